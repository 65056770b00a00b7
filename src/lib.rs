//! # music-fetch
//!
//! Backend service for a personal music retrieval queue. Remote clients
//! submit a URL plus optional tags (title, artist, album); the service runs
//! an external fetch-and-tag tool for each request, strictly one at a time,
//! and exposes live queue status over a minimal REST API.
//!
//! ## Design Philosophy
//!
//! - **Single lane** - At most one retrieval is ever in flight; tasks run in
//!   submission order with no reordering or priorities
//! - **In-memory** - The task list lives in process memory; finished tasks
//!   expire after a configured horizon, nothing survives a restart
//! - **Library-first** - The server binary is a thin wrapper; everything is
//!   usable as a Rust crate for embedding and testing
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use music_fetch::{Config, UploadService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let service = Arc::new(UploadService::new(config.clone()).await?);
//!
//!     // Serve the REST API (blocks until shutdown signal)
//!     music_fetch::api::start_api_server(service, Arc::new(config)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Failure semantics
//!
//! A failed retrieval is not retried and has no dedicated status: the task
//! stays `UPLOADING` and the queue halts until the process restarts. This
//! mirrors the behavior of the system this service replaces; see
//! [`service::UploadService::queue_request`] for details.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Retrieval executor boundary (external fetch-and-tag tool)
pub mod fetcher;
/// Core upload service (queue scheduler + expiration sweeper)
pub mod service;
/// Ordered in-memory task store
pub mod store;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{Config, FetcherConfig, ServerConfig};
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use fetcher::{CliFetcher, Fetcher};
pub use service::UploadService;
pub use store::TaskStore;
pub use types::{Event, FetchRequest, Task, TaskStatus};

/// Wait for a termination signal.
///
/// Used by the API server for graceful shutdown.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal
///   registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
pub async fn shutdown_signal() {
    wait_for_signal().await
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
