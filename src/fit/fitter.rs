//! Least-squares fit of `y = b/x² + a` and its coefficient of determination.
//!
//! Given paired samples `(x_i, y_i)` with `x_i > 0`, we:
//! - solve the normal equations in `u = 1/x²` for `(a, b)`
//! - compute residuals against the fitted curve
//! - return `R² = 1 - SSres/SStot` (or `0` when `SStot = 0`)
//!
//! R² is returned unclamped. It can be negative, and can exceed 1 by rounding
//! noise; transforms are responsible for clamping.

use crate::math::{NormalSums, solve_normal_equations};
use crate::models::InverseSquareModel;

/// Minimum number of samples for a two-parameter fit.
pub const MIN_POINTS: usize = 2;

/// Reasons a fit cannot produce an R².
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitError {
    /// `x` and `y` have different lengths.
    LengthMismatch { x: usize, y: usize },
    /// Fewer than `MIN_POINTS` samples.
    InsufficientPoints { n: usize },
    /// A sample is non-finite or has `x <= 0`.
    InvalidSample { index: usize },
    /// The normal equations are numerically singular.
    Degenerate,
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::LengthMismatch { x, y } => {
                write!(f, "x and y lengths differ ({x} vs {y})")
            }
            FitError::InsufficientPoints { .. } => {
                write!(f, "need at least {MIN_POINTS} valid points")
            }
            FitError::InvalidSample { index } => {
                write!(f, "invalid sample at index {index}")
            }
            FitError::Degenerate => write!(f, "fit is degenerate for these points"),
        }
    }
}

impl std::error::Error for FitError {}

/// Fit the inverse-square model and return its coefficients.
pub fn fit_model(x: &[f64], y: &[f64]) -> Result<InverseSquareModel, FitError> {
    validate_samples(x, y)?;

    let sums = NormalSums::from_samples(x, y);
    let (a, b) = solve_normal_equations(&sums).ok_or(FitError::Degenerate)?;
    Ok(InverseSquareModel::new(a, b))
}

/// Fit the inverse-square model and return R².
pub fn fit_r_squared(x: &[f64], y: &[f64]) -> Result<f64, FitError> {
    let model = fit_model(x, y)?;
    Ok(r_squared(&model, x, y))
}

/// Coefficient of determination of `model` on `(x, y)`.
///
/// Returns `0` when `y` has no variance.
pub fn r_squared(model: &InverseSquareModel, x: &[f64], y: &[f64]) -> f64 {
    let n = y.len() as f64;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let r = yi - model.predict(xi);
        ss_res += r * r;
        let d = yi - y_mean;
        ss_tot += d * d;
    }

    if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 }
}

fn validate_samples(x: &[f64], y: &[f64]) -> Result<(), FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < MIN_POINTS {
        return Err(FitError::InsufficientPoints { n: x.len() });
    }
    for (index, (&xi, &yi)) in x.iter().zip(y.iter()).enumerate() {
        if !(xi.is_finite() && xi > 0.0 && yi.is_finite()) {
            return Err(FitError::InvalidSample { index });
        }
    }
    Ok(())
}
