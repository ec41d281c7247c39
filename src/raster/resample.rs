//! Aspect-preserving resampling and placement of rasters

use crate::io::error::{Result, invalid_dimension};
use crate::raster::grid::{Pixel, PixelGrid};
use image::imageops::{self, FilterType};

/// Where a scaled raster landed inside a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Left edge of the scaled raster within the frame
    pub left: usize,
    /// Top edge of the scaled raster within the frame
    pub top: usize,
    /// Scaled width
    pub width: usize,
    /// Scaled height
    pub height: usize,
}

impl Placement {
    /// One past the rightmost column covered by the raster
    pub const fn right(&self) -> usize {
        self.left + self.width
    }

    /// One past the bottom row covered by the raster
    pub const fn bottom(&self) -> usize {
        self.top + self.height
    }
}

/// Uniform scale factor that fits `source` inside `max_width` x `max_height`
///
/// # Errors
///
/// Returns `InvalidDimension` if the factor is not strictly positive and finite
pub fn fit_scale(source: (usize, usize), max_width: usize, max_height: usize) -> Result<f64> {
    let (width, height) = source;
    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(invalid_dimension(
            "scaled image",
            &format!("cannot fit {width}x{height} into {max_width}x{max_height}"),
        ))
    }
}

/// Resize `source` to exactly `width` x `height`
///
/// # Errors
///
/// Returns `InvalidDimension` if the target size is degenerate
pub fn resize(source: &PixelGrid, width: usize, height: usize) -> Result<PixelGrid> {
    if source.dimensions() == (width, height) {
        return Ok(source.clone());
    }
    let target_w =
        u32::try_from(width).map_err(|_err| invalid_dimension("resize", &"width exceeds u32"))?;
    let target_h =
        u32::try_from(height).map_err(|_err| invalid_dimension("resize", &"height exceeds u32"))?;
    if target_w == 0 || target_h == 0 {
        return Err(invalid_dimension(
            "resize",
            &format!("target {width}x{height} has no pixels"),
        ));
    }
    let image = source.to_image()?;
    let resized = imageops::resize(&image, target_w, target_h, FilterType::Triangle);
    PixelGrid::from_image(resized)
}

/// Scale `source` uniformly so it fits inside `max_width` x `max_height`
///
/// # Errors
///
/// Returns `InvalidDimension` if the scale factor is degenerate
pub fn scale_to_fit(source: &PixelGrid, max_width: usize, max_height: usize) -> Result<PixelGrid> {
    let scale = fit_scale(source.dimensions(), max_width, max_height)?;
    let width = scaled_extent(source.width(), scale).min(max_width.max(1));
    let height = scaled_extent(source.height(), scale).min(max_height.max(1));
    resize(source, width, height)
}

/// Scale `source` to `width`, keeping its aspect ratio
///
/// # Errors
///
/// Returns `InvalidDimension` if `width` is zero
pub fn scale_to_width(source: &PixelGrid, width: usize) -> Result<PixelGrid> {
    if width == 0 {
        return Err(invalid_dimension("scaled image", &"target width is zero"));
    }
    let scale = width as f64 / source.width() as f64;
    resize(source, width, scaled_extent(source.height(), scale))
}

/// Fit `source` into a `width` x `height` frame filled with `background`
///
/// The source is scaled to fit `width - padding` x `height - padding` and
/// centered. Returns the composed frame together with where the scaled
/// source was placed.
///
/// # Errors
///
/// Returns `InvalidDimension` if the frame is degenerate or the padding
/// leaves no room for the source
pub fn fit_centered(
    source: &PixelGrid,
    width: usize,
    height: usize,
    padding: usize,
    background: Pixel,
) -> Result<(PixelGrid, PixelGrid, Placement)> {
    let mut frame = PixelGrid::filled(width, height, background)?;
    let scaled = scale_to_fit(
        source,
        width.saturating_sub(padding),
        height.saturating_sub(padding),
    )?;
    let placement = Placement {
        left: (width - scaled.width()) / 2,
        top: (height - scaled.height()) / 2,
        width: scaled.width(),
        height: scaled.height(),
    };
    frame.blit(&scaled, placement.left as i64, placement.top as i64);
    Ok((frame, scaled, placement))
}

fn scaled_extent(extent: usize, scale: f64) -> usize {
    ((extent as f64 * scale).round() as usize).max(1)
}
