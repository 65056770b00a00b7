//! Configuration types for music-fetch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use utoipa::ToSchema;

/// External fetch-and-tag tool configuration
///
/// Groups settings for locating the retrieval binary.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct FetcherConfig {
    /// Path to the fetch-and-tag executable (auto-detected if None)
    #[serde(default)]
    pub fetcher_path: Option<PathBuf>,

    /// Whether to search PATH for the binary if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            fetcher_path: None,
            search_path: true,
        }
    }
}

/// HTTP server configuration
///
/// Groups settings for the REST API surface.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ServerConfig {
    /// Bind address for the API server (default: 0.0.0.0:8000)
    #[serde(default = "default_bind_address")]
    #[schema(value_type = String)]
    pub bind_address: SocketAddr,

    /// Shared static token required in the Authorization header of every
    /// request (None = no authentication)
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Enable CORS (the browser-extension UI is a cross-origin caller)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins ("*" = any)
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Log at debug level by default (default: true)
    #[serde(default = "default_true")]
    pub debug_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            auth_token: None,
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            debug_mode: true,
        }
    }
}

/// Main configuration for the upload service
///
/// Sub-config fields are flattened for serialization, so the JSON config
/// file stays flat (no nesting).
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Working directory the fetch tool runs in; retrieved files land here
    /// (default: ".")
    #[serde(default = "default_music_dir")]
    pub music_dir: PathBuf,

    /// Horizon in minutes after which finished tasks are pruned from status
    /// reads (default: 60)
    #[serde(default = "default_expiration_minutes")]
    pub expiration_finished_tasks_minutes: i64,

    /// External tool settings
    #[serde(flatten)]
    pub fetcher: FetcherConfig,

    /// API server settings
    #[serde(flatten)]
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            music_dir: default_music_dir(),
            expiration_finished_tasks_minutes: default_expiration_minutes(),
            fetcher: FetcherConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration from a JSON file, creating a default one if it
    /// does not exist.
    ///
    /// When the file is missing, a pretty-printed default configuration is
    /// written to `path` and an error is returned telling the operator to
    /// edit it. This makes first startup self-documenting.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, written, or parsed.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            let default = Self::default();
            let contents = serde_json::to_string_pretty(&default)?;
            std::fs::write(path, contents)?;
            return Err(Error::Config {
                message: format!(
                    "configuration file did not exist; wrote defaults to \"{}\" - update the file and restart",
                    path.display()
                ),
                key: None,
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

fn default_music_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_expiration_minutes() -> i64 {
    60
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_true() -> bool {
    true
}
