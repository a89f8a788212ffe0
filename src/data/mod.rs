//! Data sources outside the HTTP service proper.
//!
//! - seeded synthetic samples (`sample`)
//! - a blocking client for a running endpoint (`client`)

pub mod client;
pub mod sample;

pub use client::*;
pub use sample::*;
