//! music-fetch server binary
//!
//! Thin wrapper around the library: load the configuration file, build the
//! service, and serve the REST API until a shutdown signal arrives.

#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

use music_fetch::{Config, UploadService, api};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Optional first argument overrides the config file location
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("config.json"), PathBuf::from);

    let config = match Config::load_or_init(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config);

    let service = match UploadService::new(config.clone()).await {
        Ok(service) => Arc::new(service),
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize service");
            return ExitCode::FAILURE;
        }
    };

    let config = service.get_config();
    if let Err(e) = api::start_api_server(service, config).await {
        tracing::error!(error = %e, "API server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level follows the config's
/// `debug_mode` flag.
fn init_logging(config: &Config) {
    let default_level = if config.server.debug_mode {
        "music_fetch=debug,tower_http=debug"
    } else {
        "music_fetch=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
