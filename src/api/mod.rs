//! REST API server module
//!
//! Provides a small authenticated REST API for queueing retrieval tasks and
//! monitoring the upload queue.

use crate::{Config, Result, UploadService};
use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Upload Queue
/// - `GET /upload/status` - List all tasks (triggers expiration sweep)
/// - `POST /upload` - Submit a URL for retrieval
///
/// ## System
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI specification
pub fn create_router(service: Arc<UploadService>, config: Arc<Config>) -> Router {
    let state = AppState::new(service, config.clone());

    let router = Router::new()
        // Upload queue
        .route("/upload/status", get(routes::upload_status))
        .route("/upload", post(routes::add_upload))
        // System
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // Apply authentication middleware if a shared token is configured
    let router = if config.server.auth_token.is_some() {
        router.layer(middleware::from_fn_with_state(
            config.server.auth_token.clone(),
            auth::require_auth_token,
        ))
    } else {
        router
    };

    // Apply CORS middleware if enabled in config
    if config.server.cors_enabled {
        let cors = build_cors_layer(&config.server.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// Supports "*" for any origin; otherwise only the listed origins are
/// allowed, with all methods and headers.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server on the configured bind address.
///
/// Binds a TCP listener to `server.bind_address` and serves the API router
/// until an error occurs or a shutdown signal is received.
pub async fn start_api_server(service: Arc<UploadService>, config: Arc<Config>) -> Result<()> {
    let bind_address = config.server.bind_address;

    tracing::info!(
        address = %bind_address,
        "Starting API server"
    );

    let app = create_router(service, config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(
        address = %bind_address,
        "API server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(crate::shutdown_signal())
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
