//! Single-image pattern stereogram construction
//!
//! For each row, the first `min_disparity` columns are seeded straight from
//! the pattern, phase-shifted by the local offset. Every later pixel copies the
//! output pixel `min_disparity - offset` columns to its left in the same row.
//! A larger offset shortens the local repeat period, which a viewer fusing the
//! image perceives as a surface closer to them.
//!
//! Rows are independent and computed in parallel. Within a row the columns
//! must be produced strictly left to right because each pixel may read one
//! written up to `min_disparity` columns earlier.

use crate::io::error::{Result, StereogramError, invalid_dimension};
use crate::raster::grid::{CHANNELS, Pixel, PixelGrid};
use crate::synthesis::disparity::DisparityParams;
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};
use tracing::debug;

/// Synthesize the stereogram for `depth` using `pattern`
///
/// `depth` must match the output size; its red channel is the depth sample.
/// `pattern` must be at least `min_disparity` wide; pattern rows are reused
/// cyclically if it is shorter than the output.
///
/// # Errors
///
/// Returns `InvalidDimension` or `InvalidParameter` if the parameters fail
/// validation or the pattern is narrower than one period. Nothing is indexed
/// before validation succeeds.
pub fn synthesize(
    depth: &PixelGrid,
    pattern: &PixelGrid,
    params: &DisparityParams,
) -> Result<PixelGrid> {
    params.validate()?;
    if pattern.width() < params.min_disparity {
        return Err(invalid_dimension(
            "pattern",
            &format!(
                "width {} is narrower than min_disparity {}",
                pattern.width(),
                params.min_disparity
            ),
        ));
    }

    let (width, height) = depth.dimensions();
    debug!(
        width,
        height,
        min_disparity = params.min_disparity,
        max_disparity = params.max_disparity,
        scale = params.scale,
        "synthesizing stereogram"
    );

    let offsets = params.offset_table();
    let mut output = PixelGrid::new(width, height)?;
    let stride = output.stride();

    output
        .as_raw_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .try_for_each(|(y, row)| {
            let depth_row = depth.row(y)?;
            let pattern_row = pattern.row(y % pattern.height())?;
            synthesize_row(row, depth_row, pattern_row, params.min_disparity, &offsets)
                .map_err(|x| StereogramError::OutOfRangeAccess {
                    x,
                    y,
                    width,
                    height,
                })
        })?;

    Ok(output)
}

/// Fill one output row; on failure returns the offending column
fn synthesize_row(
    row: &mut [u8],
    depth_row: &[u8],
    pattern_row: &[u8],
    min_disparity: usize,
    offsets: &[usize; 256],
) -> std::result::Result<(), usize> {
    let width = row.len() / CHANNELS;
    for x in 0..width {
        let depth = depth_row.get(x * CHANNELS).copied().ok_or(x)?;
        let offset = offsets.get(usize::from(depth)).copied().ok_or(x)?;

        let pixel = if x < min_disparity {
            read_pixel(pattern_row, (x + offset) % min_disparity)
        } else {
            read_pixel(row, x + offset - min_disparity)
        }
        .ok_or(x)?;

        row.get_mut(x * CHANNELS..(x + 1) * CHANNELS)
            .ok_or(x)?
            .copy_from_slice(&pixel);
    }
    Ok(())
}

fn read_pixel(samples: &[u8], x: usize) -> Option<Pixel> {
    samples
        .get(x * CHANNELS..(x + 1) * CHANNELS)
        .and_then(|s| Pixel::try_from(s).ok())
}
