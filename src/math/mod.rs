//! Mathematical utilities for color and gradients

/// Color space conversion and blend formulas
pub mod color;
/// Piecewise-linear interpolation through stops
pub mod interpolation;
