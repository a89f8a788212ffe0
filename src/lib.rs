//! `invsq-fit` library crate.
//!
//! The binary (`invsq`) is a thin wrapper around this library so that:
//!
//! - the fitter and transforms are testable without spawning processes
//! - the HTTP router can be driven in-process by integration tests
//! - the offline CLI and the service share one pipeline

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
pub mod server;
