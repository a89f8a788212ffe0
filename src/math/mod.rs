//! Mathematical utilities: the inverse-square basis and the closed-form solver.

pub mod basis;
pub mod ols;

pub use basis::*;
pub use ols::*;
