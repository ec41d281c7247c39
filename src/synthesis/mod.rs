/// Disparity bounds and depth-to-offset mapping
pub mod disparity;
/// Cached regeneration from an explicit configuration
pub mod engine;
/// Debouncing and single-flight regeneration scheduling
pub mod scheduler;
/// Row-parallel stereogram construction
pub mod synthesizer;

pub use disparity::DisparityParams;
pub use engine::{Engine, OutputMode, StereogramConfig};
pub use synthesizer::synthesize;
