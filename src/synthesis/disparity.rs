//! Disparity bounds and the depth-to-offset mapping

use crate::io::configuration::{
    MAX_DISPARITY_PERCENT, MAX_DISPARITY_SCALE, MIN_DISPARITY_PERCENT, MIN_DISPARITY_SCALE,
};
use crate::io::error::{Result, invalid_dimension, invalid_parameter};

/// Horizontal disparity range and its user-adjustable multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisparityParams {
    /// Smallest repeat period; also the pattern tile width
    pub min_disparity: usize,
    /// Largest repeat period before scaling
    pub max_disparity: usize,
    /// Multiplier applied to the disparity range
    pub scale: f64,
}

/// Check a user-supplied disparity scale against 0.1..=1.75
///
/// # Errors
///
/// Returns `InvalidParameter` if `scale` lies outside the range
pub fn check_scale(scale: f64) -> Result<()> {
    if (MIN_DISPARITY_SCALE..=MAX_DISPARITY_SCALE).contains(&scale) {
        Ok(())
    } else {
        Err(invalid_parameter(
            "disparity_scale",
            &scale,
            &format!("must lie within {MIN_DISPARITY_SCALE}..={MAX_DISPARITY_SCALE}"),
        ))
    }
}

impl DisparityParams {
    /// Bounds derived from the output width: 15% and 20% of it, floored
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `scale` lies outside 0.1..=1.75 and
    /// `InvalidDimension` if the width is too small for a positive minimum
    pub fn for_width(width: usize, scale: f64) -> Result<Self> {
        check_scale(scale)?;
        let params = Self {
            min_disparity: width * MIN_DISPARITY_PERCENT / 100,
            max_disparity: width * MAX_DISPARITY_PERCENT / 100,
            scale,
        };
        params.validate()?;
        Ok(params)
    }

    /// Width of one pattern tile
    pub const fn tile_width(&self) -> usize {
        self.min_disparity
    }

    /// Check that every offset produced by these parameters is indexable
    ///
    /// The self-referencing copy reads `min_disparity - offset` columns to the
    /// left, so the largest possible offset must stay below `min_disparity`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` for a zero minimum, an inverted range or an
    /// offset range reaching the minimum, and `InvalidParameter` for a scale
    /// that is not a positive finite number
    pub fn validate(&self) -> Result<()> {
        if self.min_disparity == 0 {
            return Err(invalid_dimension(
                "disparity",
                &"min_disparity must be positive",
            ));
        }
        if self.max_disparity < self.min_disparity {
            return Err(invalid_dimension(
                "disparity",
                &format!(
                    "max_disparity {} is below min_disparity {}",
                    self.max_disparity, self.min_disparity
                ),
            ));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(invalid_parameter(
                "disparity_scale",
                &self.scale,
                &"must be a positive finite number",
            ));
        }
        let largest = self.offset(u8::MAX);
        if largest >= self.min_disparity {
            return Err(invalid_dimension(
                "disparity",
                &format!(
                    "largest offset {largest} reaches min_disparity {}",
                    self.min_disparity
                ),
            ));
        }
        Ok(())
    }

    /// Column offset for a red-channel depth sample
    ///
    /// `floor(depth / 255 * (max - min) * scale)`; truncated, never rounded.
    pub fn offset(&self, depth: u8) -> usize {
        let depth_value = f64::from(depth) / 255.0;
        let range = self.max_disparity.saturating_sub(self.min_disparity) as f64;
        (depth_value * range * self.scale).floor().max(0.0) as usize
    }

    /// Offsets for every possible depth sample
    pub fn offset_table(&self) -> [usize; 256] {
        let mut table = [0; 256];
        for (depth, slot) in (0..=u8::MAX).zip(table.iter_mut()) {
            *slot = self.offset(depth);
        }
        table
    }
}
