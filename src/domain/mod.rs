//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - validated sample sets (`SampleSet`)
//! - response payloads (`MainResult`, `ErrorBody`)
//! - resolved run configuration (`ServerConfig`, `SampleConfig`)

pub mod types;

pub use types::*;
