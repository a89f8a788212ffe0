//! Input helpers.
//!
//! - JSON/CSV row ingest + validation (`ingest`)

pub mod ingest;

pub use ingest::*;
