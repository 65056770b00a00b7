//! Core upload service split into focused submodules.
//!
//! The `UploadService` struct and its methods are organized by concern:
//! - [`scheduler`] - Enqueue and single-lane queue progression
//! - [`sweeper`] - Expiration of finished tasks
//!
//! One service instance is constructed by the process wiring and shared
//! (Arc-wrapped) with the API facade; there is no hidden global state.

mod scheduler;
mod sweeper;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetcher::{CliFetcher, Fetcher};
use crate::store::TaskStore;
use crate::types::{Event, Task};
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};

/// Main service instance (cloneable - all fields are Arc-wrapped).
///
/// Owns the in-memory task store, the single-lane scheduler, and the
/// expiration sweeper. All store access goes through one mutex; every
/// critical section is brief, so status reads and enqueues stay responsive
/// while a retrieval runs.
#[derive(Clone)]
pub struct UploadService {
    /// Ordered task store (single writer at a time; readers take snapshots)
    pub(crate) store: Arc<Mutex<TaskStore>>,
    /// Retrieval executor (trait object for pluggable implementations)
    pub(crate) fetcher: Arc<dyn Fetcher>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: broadcast::Sender<Event>,
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
}

impl UploadService {
    /// Create a new service instance using the external CLI fetch tool.
    ///
    /// Ensures the music directory exists and resolves the fetch binary
    /// from the configuration (explicit path, or PATH discovery).
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the music directory cannot be
    /// created or no fetch binary can be resolved.
    pub async fn new(config: Config) -> Result<Self> {
        tokio::fs::create_dir_all(&config.music_dir)
            .await
            .map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create music directory '{}': {}",
                        config.music_dir.display(),
                        e
                    ),
                ))
            })?;

        let fetcher: Arc<dyn Fetcher> = if let Some(ref path) = config.fetcher.fetcher_path {
            Arc::new(CliFetcher::new(path.clone(), config.music_dir.clone()))
        } else if config.fetcher.search_path {
            let fetcher = CliFetcher::from_path(config.music_dir.clone()).ok_or_else(|| {
                Error::config(
                    "fetch tool not found in PATH and no fetcher_path configured",
                    "fetcher_path",
                )
            })?;
            Arc::new(fetcher)
        } else {
            return Err(Error::config(
                "no fetcher_path configured and PATH search disabled",
                "fetcher_path",
            ));
        };

        tracing::info!(fetcher = fetcher.name(), "Fetcher initialized");

        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Create a service instance with an explicit fetcher implementation.
    ///
    /// Used for embedding and for tests that drive a scripted fetcher.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        // Buffered so the queue never blocks on slow subscribers
        let (event_tx, _rx) = broadcast::channel(256);

        Self {
            store: Arc::new(Mutex::new(TaskStore::new())),
            fetcher,
            event_tx,
            config: Arc::new(config),
        }
    }

    /// Subscribe to task lifecycle events.
    ///
    /// Multiple subscribers are supported; each receives all events
    /// independently. Events are dropped silently when no one listens.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Consistent snapshot of the full ordered task list.
    ///
    /// Status reads never observe a torn status/timestamp pair: the clone
    /// happens under the store mutex.
    pub async fn tasks(&self) -> Vec<Task> {
        self.store.lock().await.snapshot()
    }

    /// Get the current configuration (cheap Arc clone)
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Emit an event to all subscribers.
    ///
    /// send() returns Err if there are no receivers, which is fine - the
    /// event is dropped and the queue keeps moving.
    pub(crate) fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }

    /// Spawn the REST API server in a background task.
    ///
    /// The server runs concurrently with queue processing and listens on
    /// the configured bind address.
    pub fn spawn_api_server(self: &Arc<Self>) -> tokio::task::JoinHandle<Result<()>> {
        let service = self.clone();
        let config = self.config.clone();

        tokio::spawn(async move { crate::api::start_api_server(service, config).await })
    }
}
