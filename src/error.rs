//! Process-level error type.
//!
//! Domain failures (`FitError`, `TransformError`, `PipelineError`) live next to the code that
//! raises them. They are converted into an `AppError` at the CLI boundary and into
//! an `ApiError` (see `server::response`) at the HTTP boundary.

use crate::app::pipeline::PipelineError;
use crate::fit::{FitError, TransformError};

/// Exit code for usage, configuration and input-file problems.
pub const EXIT_USAGE: u8 = 2;
/// Exit code when too few valid points survive ingest.
pub const EXIT_DATA: u8 = 3;
/// Exit code for fit, transform and runtime failures.
pub const EXIT_RUNTIME: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let code = match err {
            FitError::InsufficientPoints { .. } => EXIT_DATA,
            _ => EXIT_RUNTIME,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<TransformError> for AppError {
    fn from(err: TransformError) -> Self {
        AppError::new(EXIT_RUNTIME, err.to_string())
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Fit(e) => e.into(),
            PipelineError::Transform(e) => e.into(),
        }
    }
}
