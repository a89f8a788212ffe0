//! Shared "fit pipeline" logic used by the HTTP handlers and the CLI.
//!
//! Keeping this in one place means both endpoints and `invsq fit` run the same
//! workflow:
//! samples -> fit (R²) -> transform -> rounded main result
//!
//! The callers only differ in how they pick the transform.

use tracing::debug;

use crate::domain::{MainResult, SampleSet};
use crate::fit::{FitError, Transform, TransformError, evaluate, fit_r_squared};

/// Failure anywhere in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineError {
    Fit(FitError),
    Transform(TransformError),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Fit(e) => e.fmt(f),
            PipelineError::Transform(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<FitError> for PipelineError {
    fn from(err: FitError) -> Self {
        PipelineError::Fit(err)
    }
}

impl From<TransformError> for PipelineError {
    fn from(err: TransformError) -> Self {
        PipelineError::Transform(err)
    }
}

/// Fit `samples` and publish R² through `transform`.
///
/// R² itself never leaves this function.
pub fn main_result(samples: &SampleSet, transform: Transform) -> Result<MainResult, PipelineError> {
    let r2 = fit_r_squared(samples.x(), samples.y())?;
    let main_result = evaluate(transform, r2)?;
    debug!(n = samples.len(), %transform, "fit complete");
    Ok(MainResult { main_result })
}
