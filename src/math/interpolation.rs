//! Piecewise-linear interpolation through color and gain stops
//!
//! Gradients in this crate are defined by a handful of stops; between two
//! stops values change linearly, outside the stop range the nearest boundary
//! value holds.

use std::error::Error;
use std::fmt;

/// Error type for interpolation operations
#[derive(Debug, Clone)]
pub struct InterpolationError {
    message: String,
}

impl fmt::Display for InterpolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interpolation error: {}", self.message)
    }
}

impl Error for InterpolationError {}

impl InterpolationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Piecewise-linear interpolation over strictly increasing positions
#[derive(Debug, Clone)]
pub struct Linear {
    x_values: Vec<f64>,
    y_values: Vec<f64>,
}

impl Linear {
    /// Create a new interpolation from stop positions and values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `x_values` and `y_values` have different lengths
    /// - Fewer than 2 stops are provided
    /// - The positions are not strictly increasing
    pub fn new(x_values: Vec<f64>, y_values: Vec<f64>) -> Result<Self, InterpolationError> {
        if x_values.len() != y_values.len() {
            return Err(InterpolationError::new(
                "x_values and y_values must have the same length",
            ));
        }
        if x_values.len() < 2 {
            return Err(InterpolationError::new(
                "Need at least 2 points for interpolation",
            ));
        }
        if x_values.windows(2).any(|pair| match pair {
            [a, b] => a >= b,
            _ => false,
        }) {
            return Err(InterpolationError::new(
                "x values must be strictly increasing",
            ));
        }

        Ok(Self { x_values, y_values })
    }

    /// Evaluate the interpolation at point x
    ///
    /// Points outside the stop range return the nearest boundary value.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.x_values.len();
        let first = self.x_values.first().zip(self.y_values.first());
        let last = self.x_values.last().zip(self.y_values.last());

        match (first, last) {
            (Some((&x0, &y0)), _) if x <= x0 => return y0,
            (_, Some((&xn, &yn))) if x >= xn => return yn,
            (None, _) | (_, None) => return 0.0,
            _ => {}
        }

        let mut klo = 0;
        let mut khi = n - 1;
        while khi - klo > 1 {
            let k = usize::midpoint(khi, klo);
            if self.x_values.get(k).is_some_and(|&x_k| x_k > x) {
                khi = k;
            } else {
                klo = k;
            }
        }

        match (
            self.x_values.get(klo),
            self.x_values.get(khi),
            self.y_values.get(klo),
            self.y_values.get(khi),
        ) {
            (Some(&x_lo), Some(&x_hi), Some(&y_lo), Some(&y_hi)) => {
                let t = (x - x_lo) / (x_hi - x_lo);
                (y_hi - y_lo).mul_add(t, y_lo)
            }
            _ => 0.0,
        }
    }
}
