//! Evaluation of the inverse-square model `y = b/x² + a`.

use crate::math::inverse_square;

/// Fitted coefficients of `y = b/x² + a`.
///
/// Only the fitter constructs this; coefficients are consumed internally to
/// compute residuals and never leave the crate's HTTP or CLI surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSquareModel {
    /// Intercept.
    pub a: f64,
    /// Coefficient on `1/x²`.
    pub b: f64,
}

impl InverseSquareModel {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Predict `y(x)`.
    pub fn predict(&self, x: f64) -> f64 {
        self.b * inverse_square(x) + self.a
    }
}
