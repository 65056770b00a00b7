//! Application state for the API server

use crate::{Config, UploadService};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clone); provides access to the
/// service instance and configuration.
#[derive(Clone)]
pub struct AppState {
    /// The upload service instance
    pub service: Arc<UploadService>,

    /// Configuration (read access)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service: Arc<UploadService>, config: Arc<Config>) -> Self {
        Self { service, config }
    }
}
