//! Response envelopes for the HTTP boundary.
//!
//! Every response, success or failure, carries `Content-Type: application/json`
//! and the same three CORS headers. `Access-Control-Allow-Origin` echoes the
//! request's `Origin`, or `*` when there is none.

use axum::Json;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE, ORIGIN,
};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::app::pipeline::PipelineError;
use crate::domain::ErrorBody;
use crate::fit::{FitError, UnknownTransform};
use crate::io::RowsNotArray;

const ALLOW_METHODS: &str = "POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type";

/// The origin to echo back in `Access-Control-Allow-Origin`.
#[derive(Debug, Clone)]
pub struct AllowOrigin(HeaderValue);

impl AllowOrigin {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let value = headers
            .get(ORIGIN)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static("*"));
        Self(value)
    }

    fn cors_headers(&self) -> [(HeaderName, HeaderValue); 3] {
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, self.0.clone()),
            (ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS)),
            (ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS)),
        ]
    }

    /// JSON body with CORS headers.
    pub fn json<T: Serialize>(&self, status: StatusCode, body: &T) -> Response {
        (status, self.cors_headers(), Json(body)).into_response()
    }

    /// Empty 204 for preflight requests.
    pub fn no_content(&self) -> Response {
        (
            StatusCode::NO_CONTENT,
            self.cors_headers(),
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        )
            .into_response()
    }

    pub fn error(&self, err: &ApiError) -> Response {
        self.json(
            err.status,
            &ErrorBody {
                error: err.message.clone(),
            },
        )
    }
}

/// A request-terminating failure with its HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.status.as_u16())
    }
}

impl std::error::Error for ApiError {}

impl From<RowsNotArray> for ApiError {
    fn from(err: RowsNotArray) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<UnknownTransform> for ApiError {
    fn from(err: UnknownTransform) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            // Shape problems are the caller's; numerical ones belong to the data.
            PipelineError::Fit(
                FitError::InsufficientPoints { .. }
                | FitError::LengthMismatch { .. }
                | FitError::InvalidSample { .. },
            ) => ApiError::bad_request(err.to_string()),
            PipelineError::Fit(FitError::Degenerate) | PipelineError::Transform(_) => {
                ApiError::unprocessable(err.to_string())
            }
        }
    }
}
