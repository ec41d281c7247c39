//! Raster storage and resampling
//!
//! This module contains raster-related functionality including:
//! - Bounds-checked RGBA pixel grids
//! - Aspect-preserving scaling and centered placement

/// Bounds-checked RGBA pixel storage
pub mod grid;
/// Scaling and placement of rasters inside frames
pub mod resample;

pub use grid::{Pixel, PixelGrid};
