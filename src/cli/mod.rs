//! Command-line parsing for the inverse-square fit service.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting/transform code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::fit::Transform;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "invsq", version, about = "Inverse-square curve fit service (y = b/x² + a)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service (`POST /fit`, `POST /fit/transform`).
    Serve(ServeArgs),
    /// Fit a local rows file and print `{"mainResult": ...}`.
    Fit(FitArgs),
    /// List the available transforms.
    Transforms,
    /// Print a synthetic `{"rows": ...}` document drawn from a known curve.
    Sample(SampleArgs),
    /// Send a rows file to a running endpoint and print the reply.
    Post(PostArgs),
}

/// Options for the HTTP service.
///
/// Unset flags fall back to `INVSQ_HOST` / `INVSQ_PORT` (a `.env` file is read
/// first), then to `127.0.0.1:8080`.
#[derive(Debug, Parser, Clone)]
pub struct ServeArgs {
    /// Interface to bind.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind.
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Options for offline fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Rows file: `.json` (`{"rows": [...]}` or a bare array) or `x,y` CSV.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Transform key; defaults to the fixed endpoint's transform.
    #[arg(short, long, value_name = "KEY")]
    pub transform: Option<Transform>,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Intercept of the generating curve.
    #[arg(short, long, allow_negative_numbers = true)]
    pub a: f64,

    /// Coefficient on 1/x² of the generating curve.
    #[arg(short, long, allow_negative_numbers = true)]
    pub b: f64,

    /// Number of rows.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Smallest x.
    #[arg(long, default_value_t = 0.5)]
    pub x_min: f64,

    /// Largest x.
    #[arg(long, default_value_t = 5.0)]
    pub x_max: f64,

    /// Standard deviation of Gaussian noise added to y.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for submitting to a running endpoint.
#[derive(Debug, Parser, Clone)]
pub struct PostArgs {
    /// Endpoint URL, e.g. `http://127.0.0.1:8080/fit`.
    #[arg(long)]
    pub url: String,

    /// Rows file (same formats as `fit`).
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Transform key to send as `transformKey`.
    #[arg(short, long, value_name = "KEY")]
    pub transform: Option<Transform>,
}
