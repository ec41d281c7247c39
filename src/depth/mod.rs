//! Depth field normalization

/// Placement, edge policies and polarity handling for depth rasters
pub mod renderer;

pub use renderer::{DepthPolarity, DepthPolicy, DepthRenderOptions, render_depth_field};
