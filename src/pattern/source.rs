//! Pattern strips cut from a caller-supplied image

use crate::io::error::{Result, unsupported_pattern_source};
use crate::raster::grid::PixelGrid;
use crate::raster::resample::scale_to_width;

/// Build a `tile_width` x `height` strip from `source`
///
/// The source is scaled to `tile_width` columns keeping its aspect ratio and
/// then stacked top to bottom until the strip is full; the last copy is cut
/// off at the bottom edge.
///
/// # Errors
///
/// Returns `UnsupportedPatternSource` if the source cannot be scaled to the
/// tile width
pub fn image_strip(source: &PixelGrid, tile_width: usize, height: usize) -> Result<PixelGrid> {
    let tile = scale_to_width(source, tile_width).map_err(|err| {
        unsupported_pattern_source(&format!(
            "{}x{} source cannot form a {tile_width} pixel tile: {err}",
            source.width(),
            source.height()
        ))
    })?;

    let mut strip = PixelGrid::new(tile_width, height)?;
    let mut top = 0;
    while top < height {
        strip.blit(&tile, 0, top as i64);
        top += tile.height();
    }
    Ok(strip)
}
