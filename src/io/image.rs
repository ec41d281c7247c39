//! Raster loading and lossless export

use crate::io::error::{Result, StereogramError, unsupported_pattern_source};
use crate::raster::grid::PixelGrid;
use image::ImageFormat;
use std::path::Path;

/// Load any supported image file as an RGBA grid
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image has no pixels
pub fn load_raster(path: &Path) -> Result<PixelGrid> {
    let img = image::open(path).map_err(|e| StereogramError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    PixelGrid::from_image(img.to_rgba8())
}

/// Decode an encoded custom pattern source
///
/// # Errors
///
/// Returns `UnsupportedPatternSource` if the bytes are not a decodable,
/// non-empty image
pub fn decode_pattern_source(bytes: &[u8]) -> Result<PixelGrid> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| unsupported_pattern_source(&format!("cannot decode image: {e}")))?;
    PixelGrid::from_image(img.to_rgba8())
        .map_err(|e| unsupported_pattern_source(&format!("unusable image: {e}")))
}

/// Read and decode a custom pattern source file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read and
/// `UnsupportedPatternSource` if it cannot be decoded
pub fn load_pattern_source(path: &Path) -> Result<PixelGrid> {
    let bytes = std::fs::read(path).map_err(|e| StereogramError::FileSystem {
        path: path.to_path_buf(),
        operation: "read pattern source",
        source: e,
    })?;
    decode_pattern_source(&bytes)
}

/// Export a grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or saved to the specified path
pub fn export_png(grid: &PixelGrid, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| StereogramError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    grid.to_image()?
        .save_with_format(output_path, ImageFormat::Png)
        .map_err(|e| StereogramError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
