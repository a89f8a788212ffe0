//! Basis function for the inverse-square model `y = b/x² + a`.
//!
//! The model is linear in `(a, b)` once `x` is replaced by `u = 1/x²`, so the fit
//! reduces to simple linear regression of `y` on `u`.

/// The substituted regressor `u = 1/x²`.
///
/// Callers guarantee `x > 0`; no guard is applied here so that degenerate inputs
/// surface in the determinant check rather than being silently patched.
#[inline]
pub fn inverse_square(x: f64) -> f64 {
    1.0 / (x * x)
}
