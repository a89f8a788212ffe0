//! Shared domain types.
//!
//! Samples and payloads are request-scoped: built from one input, used, and
//! dropped. Configuration structs are resolved once at startup.

use serde::{Deserialize, Serialize};

/// Default bind host for `invsq serve`.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default bind port for `invsq serve`.
pub const DEFAULT_PORT: u16 = 8080;

/// Resolved configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Settings for synthetic sample generation (`invsq sample`).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    /// Intercept of the generating curve.
    pub a: f64,
    /// Coefficient on `1/x²` of the generating curve.
    pub b: f64,
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Standard deviation of additive Gaussian noise on `y`.
    pub noise: f64,
    pub seed: u64,
}

/// Paired samples `(x_i, y_i)` that survived row filtering.
///
/// Every `x_i` is finite and strictly positive and every `y_i` is finite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SampleSet {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
        }
    }

    /// Append a validated pair.
    pub(crate) fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Successful response payload: the transformed R², and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MainResult {
    #[serde(rename = "mainResult")]
    pub main_result: f64,
}

/// Failure response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
