//! HTTP service.
//!
//! Two stateless routes share one fitter and one transform table:
//!
//! - `POST /fit` publishes R² through the fixed `neg-log-complement` transform
//! - `POST /fit/transform` publishes it through the transform named by `transformKey`
//!
//! Both answer `OPTIONS` preflight with 204 and reject other methods with 405.

use axum::Router;
use axum::routing::post;
use tokio::net::TcpListener;
use tracing::info;

use crate::domain::ServerConfig;
use crate::error::{AppError, EXIT_RUNTIME, EXIT_USAGE};

pub mod handlers;
pub mod response;

pub use response::{AllowOrigin, ApiError};

/// Build the application router.
pub fn router() -> Router {
    Router::new()
        .route(
            "/fit",
            post(handlers::fit_fixed)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/fit/transform",
            post(handlers::fit_selectable)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<(), AppError> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|e| {
            AppError::new(
                EXIT_USAGE,
                format!("Failed to bind {}:{}: {e}", config.host, config.port),
            )
        })?;

    let local = listener
        .local_addr()
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to read bound address: {e}")))?;
    info!(addr = %local, "listening");

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Server error: {e}")))?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler, keep serving until the process is killed.
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
