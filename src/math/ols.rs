//! Closed-form least squares for a two-parameter linear model.
//!
//! The fitter solves
//!
//! ```text
//! minimize Σ (y_i - (a + b·u_i))^2
//! ```
//!
//! on the centered design `[1, u_i - ū]`, whose normal equations are diagonal:
//!
//! ```text
//! [ n  0   ] [a + b·ū]   [ Sy   ]
//! [ 0  Suu ] [   b   ] = [ Suy  ]
//! ```
//!
//! with `Suu = Σ (u_i - ū)²` and `Suy = Σ (u_i - ū)(y_i - ȳ)`. The determinant
//! `n·Suu` equals `n·Σu² - (Σu)²` but does not cancel catastrophically, so a
//! sample whose `u_i` are all equal lands at (or within rounding of) zero.
//!
//! Near-singular systems are rejected instead of being regularized: such samples
//! carry no information about `b`.

use nalgebra::Matrix2;

use crate::math::inverse_square;

/// Determinant magnitude below which the normal equations are treated as singular.
pub const DET_EPS: f64 = 1e-20;

/// Centered sums needed by the normal equations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalSums {
    pub n: f64,
    pub mean_u: f64,
    pub mean_y: f64,
    pub suu: f64,
    pub suy: f64,
}

impl NormalSums {
    /// Accumulate sums over paired `(x, y)` samples using `u = 1/x²`.
    pub fn from_samples(x: &[f64], y: &[f64]) -> Self {
        let pairs = || x.iter().zip(y.iter()).map(|(&xi, &yi)| (inverse_square(xi), yi));

        let mut sums = NormalSums::default();
        for (u, yi) in pairs() {
            sums.n += 1.0;
            sums.mean_u += u;
            sums.mean_y += yi;
        }
        if sums.n == 0.0 {
            return sums;
        }
        sums.mean_u /= sums.n;
        sums.mean_y /= sums.n;

        for (u, yi) in pairs() {
            let du = u - sums.mean_u;
            sums.suu += du * du;
            sums.suy += du * (yi - sums.mean_y);
        }
        sums
    }

    /// The normal matrix `XᵀX` for the centered design `[1, u - ū]`.
    pub fn normal_matrix(&self) -> Matrix2<f64> {
        Matrix2::new(self.n, 0.0, 0.0, self.suu)
    }
}

/// Solve the normal equations for `(a, b)`.
///
/// Returns `None` when `|det| < DET_EPS`.
pub fn solve_normal_equations(sums: &NormalSums) -> Option<(f64, f64)> {
    let det = sums.normal_matrix().determinant();
    if !(det.abs() >= DET_EPS) {
        return None;
    }

    let b = sums.suy / sums.suu;
    let a = sums.mean_y - b * sums.mean_u;
    Some((a, b))
}
