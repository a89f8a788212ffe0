//! Curve fitting and R² transforms.
//!
//! Responsibilities:
//!
//! - fit `y = b/x² + a` by closed-form least squares and report R²
//! - map R² through one of the named monotone transforms

pub mod fitter;
pub mod transform;

pub use fitter::*;
pub use transform::*;
