//! Input/output operations, configuration and error handling

/// Command-line interface and batch processing
pub mod cli;
/// Configuration constants
pub mod configuration;
/// Error types
pub mod error;
/// Raster loading, decoding and PNG export
pub mod image;
/// Multi-file progress display
pub mod progress;
