//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - parses CLI arguments (after loading `.env`)
//! - runs the HTTP service, or one of the offline commands

use std::path::Path;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, FitArgs, PostArgs, SampleArgs, ServeArgs};
use crate::data::{FitClient, generate_rows, rows_document};
use crate::domain::{DEFAULT_HOST, DEFAULT_PORT, SampleConfig, ServerConfig};
use crate::error::{AppError, EXIT_DATA, EXIT_RUNTIME, EXIT_USAGE};
use crate::fit::{DEFAULT_TRANSFORM, MIN_POINTS};
use crate::io::{IngestedRows, load_rows_file};

pub mod pipeline;

/// Environment variable overriding the default bind host.
pub const ENV_HOST: &str = "INVSQ_HOST";
/// Environment variable overriding the default bind port.
pub const ENV_PORT: &str = "INVSQ_PORT";

/// Entry point for the `invsq` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Serve(args) => handle_serve(args),
        Command::Fit(args) => handle_fit(args),
        Command::Transforms => {
            print!("{}", crate::report::format_transform_table());
            Ok(())
        }
        Command::Sample(args) => handle_sample(args),
        Command::Post(args) => handle_post(args),
    }
}

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` overrides `info`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_serve(args: ServeArgs) -> Result<(), AppError> {
    let config = server_config_from_args(&args, |key| std::env::var(key).ok())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to start runtime: {e}")))?;

    runtime.block_on(crate::server::serve(&config))
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let ingested = load_checked(&args.input)?;
    let transform = args.transform.unwrap_or(DEFAULT_TRANSFORM);

    let result = pipeline::main_result(&ingested.samples, transform)?;

    println!("{}", to_json(&result)?);
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = sample_config_from_args(&args);
    let rows = generate_rows(&config)?;
    println!("{}", to_json(&rows_document(&rows))?);
    Ok(())
}

fn handle_post(args: PostArgs) -> Result<(), AppError> {
    let ingested = load_checked(&args.input)?;
    let rows: Vec<[f64; 2]> = ingested
        .samples
        .x()
        .iter()
        .zip(ingested.samples.y())
        .map(|(&x, &y)| [x, y])
        .collect();

    let client = FitClient::new(args.url.clone());
    let reply = client.submit(&serde_json::json!(rows), args.transform)?;
    info!(status = reply.status, url = %args.url, "endpoint replied");
    println!("{}", to_json(&reply.body)?);

    if (200..300).contains(&reply.status) {
        Ok(())
    } else {
        Err(AppError::new(EXIT_RUNTIME, format!("Endpoint returned status {}.", reply.status)))
    }
}

/// Load a rows file and require enough surviving points to fit.
fn load_checked(path: &Path) -> Result<IngestedRows, AppError> {
    let ingested = load_rows_file(path)?;
    info!("{}", crate::report::format_ingest_summary(&ingested));
    if ingested.rows_used() < MIN_POINTS {
        return Err(AppError::new(EXIT_DATA, format!("need at least {MIN_POINTS} valid points")));
    }
    Ok(ingested)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string(value)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to encode JSON: {e}")))
}

/// Resolve bind settings: flag, then environment, then default.
///
/// `env` is injected so resolution can be tested without touching the process
/// environment.
pub fn server_config_from_args(
    args: &ServeArgs,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ServerConfig, AppError> {
    let host = args
        .host
        .clone()
        .or_else(|| env(ENV_HOST))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = match (args.port, env(ENV_PORT)) {
        (Some(p), _) => p,
        (None, Some(raw)) => raw
            .trim()
            .parse::<u16>()
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Invalid {ENV_PORT} '{raw}': {e}")))?,
        (None, None) => DEFAULT_PORT,
    };

    if host.trim().is_empty() {
        return Err(AppError::new(EXIT_USAGE, "Bind host must not be empty."));
    }

    Ok(ServerConfig { host, port })
}

pub fn sample_config_from_args(args: &SampleArgs) -> SampleConfig {
    SampleConfig {
        a: args.a,
        b: args.b,
        count: args.count,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
        seed: args.seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve_args(host: Option<&str>, port: Option<u16>) -> ServeArgs {
        ServeArgs {
            host: host.map(str::to_string),
            port,
        }
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = server_config_from_args(&serve_args(None, None), |_| None).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn env_fills_unset_flags() {
        let env = |key: &str| match key {
            ENV_HOST => Some("0.0.0.0".to_string()),
            ENV_PORT => Some(" 9000 ".to_string()),
            _ => None,
        };
        let config = server_config_from_args(&serve_args(None, None), env).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);

        let config = server_config_from_args(&serve_args(Some("::1"), Some(1234)), env).unwrap();
        assert_eq!(config.host, "::1");
        assert_eq!(config.port, 1234);
    }

    #[test]
    fn bad_env_port_is_a_usage_error() {
        let env = |key: &str| (key == ENV_PORT).then(|| "http".to_string());
        let err = server_config_from_args(&serve_args(None, None), env).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_USAGE);
    }
}
