//! Request handlers.
//!
//! The two fit endpoints share `run_pipeline`; they differ only in where the
//! transform comes from (fixed vs. `transformKey`).

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tracing::{debug, warn};

use crate::app::pipeline::main_result;
use crate::domain::MainResult;
use crate::fit::{DEFAULT_TRANSFORM, MIN_POINTS, Transform};
use crate::io::parse_rows;
use crate::server::response::{AllowOrigin, ApiError};

/// `POST /fit`: fixed transform.
pub async fn fit_fixed(headers: HeaderMap, body: Bytes) -> Response {
    respond("/fit", &headers, handle_fixed(&body))
}

/// `POST /fit/transform`: caller-selected transform.
pub async fn fit_selectable(headers: HeaderMap, body: Bytes) -> Response {
    respond("/fit/transform", &headers, handle_selectable(&body))
}

/// `OPTIONS` preflight.
pub async fn preflight(headers: HeaderMap) -> Response {
    AllowOrigin::from_headers(&headers).no_content()
}

pub async fn method_not_allowed(headers: HeaderMap) -> Response {
    AllowOrigin::from_headers(&headers).error(&ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        "method not allowed",
    ))
}

pub async fn not_found(headers: HeaderMap) -> Response {
    AllowOrigin::from_headers(&headers).error(&ApiError::new(StatusCode::NOT_FOUND, "not found"))
}

fn handle_fixed(body: &[u8]) -> Result<MainResult, ApiError> {
    let doc = parse_body(body)?;
    run_pipeline(rows_field(&doc), DEFAULT_TRANSFORM)
}

fn handle_selectable(body: &[u8]) -> Result<MainResult, ApiError> {
    let doc = parse_body(body)?;
    let rows = rows_field(&doc);
    if !rows.is_array() {
        return Err(ApiError::bad_request("rows must be an array"));
    }

    // Resolve the transform before touching the rows so a bad key costs no fit.
    let key = doc
        .get("transformKey")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::bad_request("transformKey is required"))?;
    let transform: Transform = key.parse()?;

    run_pipeline(rows, transform)
}

fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejecting malformed body");
        ApiError::bad_request("invalid JSON body")
    })
}

fn rows_field(doc: &Value) -> &Value {
    doc.get("rows").unwrap_or(&Value::Null)
}

fn run_pipeline(rows: &Value, transform: Transform) -> Result<MainResult, ApiError> {
    let ingested = parse_rows(rows)?;
    debug!(
        rows_read = ingested.rows_read,
        rows_used = ingested.rows_used(),
        "rows ingested"
    );
    if ingested.rows_used() < MIN_POINTS {
        return Err(ApiError::bad_request(format!("need at least {MIN_POINTS} valid points")));
    }

    Ok(main_result(&ingested.samples, transform)?)
}

fn respond(
    route: &'static str,
    headers: &HeaderMap,
    result: Result<MainResult, ApiError>,
) -> Response {
    let origin = AllowOrigin::from_headers(headers);
    match result {
        Ok(body) => {
            debug!(route, "request served");
            origin.json(StatusCode::OK, &body)
        }
        Err(err) => {
            if err.status() == StatusCode::UNPROCESSABLE_ENTITY {
                warn!(route, %err, "fit failed");
            } else {
                debug!(route, %err, "request rejected");
            }
            origin.error(&err)
        }
    }
}
