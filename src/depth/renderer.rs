//! Normalization of externally estimated depth rasters into output-sized depth fields
//!
//! Downstream code reads depth from the red channel with the convention that
//! brighter means nearer. Sources using the opposite convention are inverted
//! here, before placement, so the background fill of each policy keeps its
//! meaning: black is the far plane, white the near plane.

use crate::io::configuration::{EDGE_MUTE_LEVEL, EDGE_MUTE_RAMP, FRAMED_PADDING_PERMILLE};
use crate::io::error::{Result, invalid_parameter};
use crate::math::color::multiply;
use crate::math::interpolation::Linear;
use crate::raster::grid::{BLACK, CHANNELS, Pixel, PixelGrid, WHITE};
use crate::raster::resample::{Placement, fit_centered};
use tracing::debug;

/// How the depth image meets the edges of the output frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthPolicy {
    /// Fill the frame edge to edge, extending the outermost columns sideways
    #[default]
    Clamp,
    /// Float the image in a near (white) plane, as if cut out of it
    Cutout,
    /// Float the image over a far (black) plane so it pops out
    Popout,
}

impl DepthPolicy {
    /// Background fill behind the depth image
    pub const fn background(self) -> Pixel {
        match self {
            Self::Clamp | Self::Popout => BLACK,
            Self::Cutout => WHITE,
        }
    }

    /// Margin kept free around the depth image for an output of `width`
    pub const fn padding(self, width: usize) -> usize {
        match self {
            Self::Clamp => 0,
            Self::Cutout | Self::Popout => width * FRAMED_PADDING_PERMILLE / 1000,
        }
    }
}

/// Which end of the source value range is near the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthPolarity {
    /// 255 is nearest (the usual output of monocular depth models)
    #[default]
    NearIsBright,
    /// 0 is nearest
    NearIsDark,
}

/// Options controlling depth field rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthRenderOptions {
    /// Edge policy
    pub policy: DepthPolicy,
    /// Polarity of the source raster
    pub polarity: DepthPolarity,
    /// Multiply the clamp vignette over the frame
    pub soften_edges: bool,
}

impl Default for DepthRenderOptions {
    fn default() -> Self {
        Self {
            policy: DepthPolicy::Clamp,
            polarity: DepthPolarity::NearIsBright,
            soften_edges: true,
        }
    }
}

/// Render `source` into a `width` x `height` depth field
///
/// # Errors
///
/// Returns `InvalidDimension` if the output frame is degenerate or the
/// source cannot be scaled into it, `InvalidParameter` if the vignette
/// profile is malformed
pub fn render_depth_field(
    source: &PixelGrid,
    width: usize,
    height: usize,
    options: DepthRenderOptions,
) -> Result<PixelGrid> {
    let policy = options.policy;
    let normalized = match options.polarity {
        DepthPolarity::NearIsBright => None,
        DepthPolarity::NearIsDark => Some(invert(source)),
    };
    let source = normalized.as_ref().unwrap_or(source);

    let (mut frame, scaled, placement) = fit_centered(
        source,
        width,
        height,
        policy.padding(width),
        policy.background(),
    )?;

    debug!(
        ?policy,
        scaled_width = placement.width,
        scaled_height = placement.height,
        left = placement.left,
        top = placement.top,
        "placed depth image"
    );

    if policy == DepthPolicy::Clamp {
        extend_edge_columns(&mut frame, &scaled, placement)?;
        if options.soften_edges {
            mute_edges(&mut frame)?;
        }
    }

    Ok(frame)
}

/// Copy the outermost columns of `scaled` across the horizontal margins
///
/// Only the rows covered by the scaled image are touched.
///
/// # Errors
///
/// Returns `OutOfRangeAccess` if `placement` does not lie inside `frame`
pub fn extend_edge_columns(
    frame: &mut PixelGrid,
    scaled: &PixelGrid,
    placement: Placement,
) -> Result<()> {
    let last = scaled.width() - 1;
    for sy in 0..scaled.height() {
        let left_edge = scaled.get(0, sy)?;
        let right_edge = scaled.get(last, sy)?;
        let row = frame.row_mut(placement.top + sy)?;
        for (x, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
            if x < placement.left {
                pixel.copy_from_slice(&left_edge);
            } else if x >= placement.right() {
                pixel.copy_from_slice(&right_edge);
            }
        }
    }
    Ok(())
}

/// Gain profile of the clamp vignette over a frame width normalized to `0..=1`
///
/// Mid-gray at both borders ramping to white over the outer fifth of the
/// width, white across the center.
///
/// # Errors
///
/// Returns `InvalidParameter` if the configured ramp does not leave the
/// curve's breakpoints strictly increasing
pub fn edge_curve() -> Result<Linear> {
    let mute = f64::from(EDGE_MUTE_LEVEL);
    let ramp = f64::from(EDGE_MUTE_RAMP);
    Linear::new(
        vec![0.0, ramp, 1.0 - ramp, 1.0],
        vec![mute, 255.0, 255.0, mute],
    )
    .map_err(|e| invalid_parameter("edge_mute_ramp", &ramp, &e))
}

/// Gain of `curve` at column `x` of a `width` wide frame
pub fn edge_gain(curve: &Linear, x: usize, width: usize) -> u8 {
    let t = if width > 1 {
        x as f64 / (width - 1) as f64
    } else {
        0.5
    };
    curve.evaluate(t).round().clamp(0.0, 255.0) as u8
}

fn mute_edges(frame: &mut PixelGrid) -> Result<()> {
    let curve = edge_curve()?;
    let width = frame.width();
    let gains: Vec<u8> = (0..width).map(|x| edge_gain(&curve, x, width)).collect();
    let stride = frame.stride();
    for row in frame.as_raw_mut().chunks_exact_mut(stride) {
        for (pixel, &gain) in row.chunks_exact_mut(CHANNELS).zip(&gains) {
            for channel in pixel.iter_mut().take(3) {
                *channel = multiply(*channel, gain);
            }
        }
    }
    Ok(())
}

fn invert(source: &PixelGrid) -> PixelGrid {
    let mut inverted = source.clone();
    for pixel in inverted.as_raw_mut().chunks_exact_mut(CHANNELS) {
        for channel in pixel.iter_mut().take(3) {
            *channel = u8::MAX - *channel;
        }
    }
    inverted
}
