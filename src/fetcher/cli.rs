//! CLI-based fetcher using the external fetch-and-tag binary

use super::traits::Fetcher;
use crate::error::{Error, Result};
use crate::types::FetchRequest;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Default binary name searched for on PATH
pub const DEFAULT_BINARY: &str = "music-metadata";

/// CLI-based fetcher invoking the external fetch-and-tag binary.
///
/// The binary is executed in the configured music directory with the
/// optional tags passed as flags and the URL as the final argument:
///
/// ```text
/// music-metadata -n <name> -a <artist> -l <album> <url>
/// ```
///
/// # Examples
///
/// ```no_run
/// use music_fetch::fetcher::CliFetcher;
/// use std::path::PathBuf;
///
/// // Explicit binary path
/// let fetcher = CliFetcher::new(PathBuf::from("/usr/local/bin/music-metadata"), "/music".into());
///
/// // Or auto-discover from PATH
/// let fetcher = CliFetcher::from_path("/music".into())
///     .expect("fetch tool not found in PATH");
/// ```
pub struct CliFetcher {
    binary_path: PathBuf,
    music_dir: PathBuf,
}

impl CliFetcher {
    /// Create a new CLI fetcher with an explicit binary path
    pub fn new(binary_path: PathBuf, music_dir: PathBuf) -> Self {
        Self {
            binary_path,
            music_dir,
        }
    }

    /// Attempt to find the fetch tool in PATH.
    ///
    /// Returns `Some(CliFetcher)` if the binary is found, `None` otherwise.
    pub fn from_path(music_dir: PathBuf) -> Option<Self> {
        which::which(DEFAULT_BINARY)
            .ok()
            .map(|path| Self::new(path, music_dir))
    }
}

#[async_trait]
impl Fetcher for CliFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<()> {
        let mut command = Command::new(&self.binary_path);
        command.current_dir(&self.music_dir);

        if let Some(ref name) = request.name {
            command.arg("-n").arg(name);
        }
        if let Some(ref artist) = request.artist {
            command.arg("-a").arg(artist);
        }
        if let Some(ref album) = request.album {
            command.arg("-l").arg(album);
        }
        command.arg(&request.url);

        tracing::debug!(
            binary = %self.binary_path.display(),
            dir = %self.music_dir.display(),
            url = %request.url,
            "Executing fetch tool"
        );

        let output = command.output().await.map_err(|e| {
            Error::ExternalTool(format!(
                "failed to execute {}: {}",
                self.binary_path.display(),
                e
            ))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.is_empty() {
            tracing::debug!(%stdout, "fetch tool output");
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            tracing::error!(%stderr, "fetch tool stderr");
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::ExternalTool(format!(
                "fetch tool exited with {}: {}",
                output.status,
                stderr.trim()
            )))
        }
    }

    fn name(&self) -> &'static str {
        "cli-fetcher"
    }
}
