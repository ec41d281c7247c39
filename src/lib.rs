//! Autostereogram synthesis from depth fields and tileable patterns
//!
//! A depth raster is normalized into an output-sized depth field, a tileable
//! pattern strip is generated, and the two are combined into a single image
//! whose local horizontal repeat period encodes depth.

#![forbid(unsafe_code)]

/// Depth field normalization with edge policies
pub mod depth;
/// Input/output operations, configuration and error handling
pub mod io;
/// Color math and interpolation helpers
pub mod math;
/// Tileable pattern generation
pub mod pattern;
/// Bounds-checked RGBA rasters and resampling
pub mod raster;
/// Stereogram synthesis, regeneration engine and scheduling
pub mod synthesis;

pub use io::error::{Result, StereogramError};
