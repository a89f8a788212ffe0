//! Blocking HTTP client for a running fit endpoint (`invsq post`).

use reqwest::blocking::Client;
use serde_json::{Value, json};

use crate::error::{AppError, EXIT_RUNTIME};
use crate::fit::Transform;

/// Client for one endpoint URL.
pub struct FitClient {
    client: Client,
    url: String,
}

/// Status and JSON body returned by the endpoint.
#[derive(Debug, Clone)]
pub struct FitReply {
    pub status: u16,
    pub body: Value,
}

impl FitClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// POST `rows` (and `transformKey`, when given) to the endpoint.
    ///
    /// Non-2xx replies are returned, not raised: the JSON error envelope is the
    /// useful part for the caller.
    pub fn submit(&self, rows: &Value, transform: Option<Transform>) -> Result<FitReply, AppError> {
        let body = request_body(rows, transform);

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .map_err(|e| {
                AppError::new(EXIT_RUNTIME, format!("Request to {} failed: {e}", self.url))
            })?;

        let status = resp.status().as_u16();
        let body: Value = resp
            .json()
            .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to parse response: {e}")))?;

        Ok(FitReply { status, body })
    }
}

fn request_body(rows: &Value, transform: Option<Transform>) -> Value {
    match transform {
        Some(t) => json!({ "rows": rows, "transformKey": t.key() }),
        None => json!({ "rows": rows }),
    }
}
