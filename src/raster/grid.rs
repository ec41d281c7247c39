//! Fixed-size RGBA pixel storage with bounds-checked access
//!
//! Every raster flowing through the engine (depth fields, pattern strips and
//! the synthesized output) is a `PixelGrid`. The buffer always holds exactly
//! `width * height * 4` interleaved RGBA samples and never changes size after
//! construction. Coordinates outside the grid are rejected with
//! `OutOfRangeAccess` rather than clamped.

use crate::io::error::{Result, StereogramError, invalid_dimension};
use image::RgbaImage;

/// Interleaved RGBA sample
pub type Pixel = [u8; 4];

/// Number of samples per pixel
pub const CHANNELS: usize = 4;

/// Opaque black
pub const BLACK: Pixel = [0, 0, 0, 255];
/// Opaque white
pub const WHITE: Pixel = [255, 255, 255, 255];

/// Row-major RGBA raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Create a grid of transparent black pixels
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if either dimension is zero or the buffer
    /// size would overflow
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Create a grid with every pixel set to `pixel`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if either dimension is zero
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Result<Self> {
        let len = buffer_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..width * height {
            data.extend_from_slice(&pixel);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing interleaved RGBA buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if a dimension is zero or `data` does not
    /// hold exactly `width * height * 4` samples
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let len = buffer_len(width, height)?;
        if data.len() != len {
            return Err(invalid_dimension(
                "pixel grid",
                &format!(
                    "buffer holds {} samples, {width}x{height} needs {len}",
                    data.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Dimensions as (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Raw interleaved samples
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw interleaved samples
    ///
    /// The slice cannot change length, so the size invariant is preserved.
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Read the pixel at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `OutOfRangeAccess` if the coordinate lies outside the grid
    pub fn get(&self, x: usize, y: usize) -> Result<Pixel> {
        let start = self.offset(x, y)?;
        self.data
            .get(start..start + CHANNELS)
            .and_then(|s| Pixel::try_from(s).ok())
            .ok_or_else(|| self.out_of_range(x, y))
    }

    /// Overwrite the pixel at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `OutOfRangeAccess` if the coordinate lies outside the grid
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) -> Result<()> {
        let start = self.offset(x, y)?;
        let error = self.out_of_range(x, y);
        let slot = self.data.get_mut(start..start + CHANNELS).ok_or(error)?;
        slot.copy_from_slice(&pixel);
        Ok(())
    }

    /// Samples of row `y`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRangeAccess` if `y` is not a valid row
    pub fn row(&self, y: usize) -> Result<&[u8]> {
        let stride = self.stride();
        let start = self.offset(0, y)?;
        self.data
            .get(start..start + stride)
            .ok_or_else(|| self.out_of_range(0, y))
    }

    /// Mutable samples of row `y`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRangeAccess` if `y` is not a valid row
    pub fn row_mut(&mut self, y: usize) -> Result<&mut [u8]> {
        let stride = self.stride();
        let start = self.offset(0, y)?;
        let error = self.out_of_range(0, y);
        self.data.get_mut(start..start + stride).ok_or(error)
    }

    /// Number of samples in one row
    pub const fn stride(&self) -> usize {
        self.width * CHANNELS
    }

    /// Repeat this grid in both directions to fill a `width` x `height` raster
    ///
    /// Pixel (x, y) of the result is pixel `(x mod self.width, y mod self.height)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if the target size is degenerate
    pub fn tiled(&self, width: usize, height: usize) -> Result<Self> {
        let mut out = Self::new(width, height)?;
        for y in 0..height {
            let source = self.row(y % self.height)?;
            let target = out.row_mut(y)?;
            for (x, dst) in target.chunks_exact_mut(CHANNELS).enumerate() {
                let start = (x % self.width) * CHANNELS;
                if let Some(src) = source.get(start..start + CHANNELS) {
                    dst.copy_from_slice(src);
                }
            }
        }
        Ok(out)
    }

    /// Copy `other` into this grid with its top-left corner at (left, top)
    ///
    /// Parts of `other` falling outside this grid are dropped.
    pub fn blit(&mut self, other: &Self, left: i64, top: i64) {
        for sy in 0..other.height {
            let dy = top + sy as i64;
            if dy < 0 || dy >= self.height as i64 {
                continue;
            }
            let x_start = left.max(0);
            let x_end = (left + other.width as i64).min(self.width as i64);
            if x_start >= x_end {
                continue;
            }
            let src_start = ((x_start - left) as usize + sy * other.width) * CHANNELS;
            let dst_start = (x_start as usize + dy as usize * self.width) * CHANNELS;
            let len = (x_end - x_start) as usize * CHANNELS;
            if let (Some(src), Some(dst)) = (
                other.data.get(src_start..src_start + len),
                self.data.get_mut(dst_start..dst_start + len),
            ) {
                dst.copy_from_slice(src);
            }
        }
    }

    /// Convert into an `image` crate buffer for encoding or resampling
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if the dimensions exceed `u32`
    pub fn to_image(&self) -> Result<RgbaImage> {
        let width = u32::try_from(self.width)
            .map_err(|_err| invalid_dimension("image", &"width exceeds u32"))?;
        let height = u32::try_from(self.height)
            .map_err(|_err| invalid_dimension("image", &"height exceeds u32"))?;
        RgbaImage::from_raw(width, height, self.data.clone())
            .ok_or_else(|| invalid_dimension("image", &"buffer does not match dimensions"))
    }

    /// Build a grid from an `image` crate buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if the image is empty
    pub fn from_image(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::from_raw(width as usize, height as usize, image.into_raw())
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_range(x, y));
        }
        Ok((y * self.width + x) * CHANNELS)
    }

    const fn out_of_range(&self, x: usize, y: usize) -> StereogramError {
        StereogramError::OutOfRangeAccess {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

fn buffer_len(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(invalid_dimension(
            "pixel grid",
            &format!("{width}x{height} has no pixels"),
        ));
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| invalid_dimension("pixel grid", &format!("{width}x{height} is too large")))
}
