//! Error types and context management for stereogram operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all stereogram operations
#[derive(Debug)]
pub enum StereogramError {
    /// Output, pattern or disparity dimensions are degenerate
    ///
    /// Covers zero-sized rasters, mismatched buffer lengths, a non-positive
    /// `min_disparity` and scale factors that collapse an image to nothing.
    InvalidDimension {
        /// What was being sized
        subject: &'static str,
        /// Description of what's wrong with the dimensions
        reason: String,
    },

    /// Pixel coordinate outside a grid's bounds
    OutOfRangeAccess {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
        /// Grid width
        width: usize,
        /// Grid height
        height: usize,
    },

    /// Custom pattern source could not be decoded or used
    UnsupportedPatternSource {
        /// Description of the failure
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load a raster from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a raster to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for StereogramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { subject, reason } => {
                write!(f, "Invalid {subject} dimensions: {reason}")
            }
            Self::OutOfRangeAccess {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Pixel ({x}, {y}) is out of range for a {width}x{height} grid"
                )
            }
            Self::UnsupportedPatternSource { reason } => {
                write!(f, "Unsupported pattern source: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for StereogramError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl StereogramError {
    /// Whether the failure stems from the inputs of a single regeneration
    ///
    /// Recoverable errors leave the previously displayed output valid; the
    /// caller skips the failed regeneration and keeps going.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::FileSystem { .. } | Self::ImageExport { .. })
    }
}

/// Convenience type alias for stereogram results
pub type Result<T> = std::result::Result<T, StereogramError>;

impl From<std::io::Error> for StereogramError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> StereogramError {
    StereogramError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid dimension error
pub fn invalid_dimension(subject: &'static str, reason: &impl ToString) -> StereogramError {
    StereogramError::InvalidDimension {
        subject,
        reason: reason.to_string(),
    }
}

/// Create an unsupported pattern source error
pub fn unsupported_pattern_source(reason: &impl ToString) -> StereogramError {
    StereogramError::UnsupportedPatternSource {
        reason: reason.to_string(),
    }
}
