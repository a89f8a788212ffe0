//! The inverse-square curve model.
//!
//! Kept as a small, pure type so that fitting code stays focused on the solve.

pub mod model;

pub use model::*;
