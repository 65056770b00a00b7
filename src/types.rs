//! Core types for music-fetch

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A retrieval request: the resource URL plus optional tag metadata.
///
/// Immutable once created. Optional fields are omitted from the JSON
/// representation when absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FetchRequest {
    /// Resource URL to fetch (must be non-empty; validated at the API boundary)
    #[serde(default)]
    pub url: String,

    /// Track title to tag the result with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Artist to tag the result with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    /// Album to tag the result with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
}

impl FetchRequest {
    /// Create a request with only a URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Task status.
///
/// The status is monotonic: a task moves `Uploading` → `Finished` exactly
/// once and never reverses. There is no failed state; a task whose
/// retrieval failed stays `Uploading` indefinitely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    /// Queued or currently being retrieved
    Uploading,
    /// Retrieval completed successfully
    Finished,
}

/// One queued retrieval with its status and last-status-change timestamp.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// The originating request (immutable)
    #[serde(flatten)]
    pub request: FetchRequest,

    /// Current status
    pub status: TaskStatus,

    /// Time of the last status change: creation time while `Uploading`,
    /// completion time once `Finished`
    pub timestamp: DateTime<Utc>,
}

impl Task {
    /// Create a new task in the `Uploading` state
    pub fn new(request: FetchRequest, now: DateTime<Utc>) -> Self {
        Self {
            request,
            status: TaskStatus::Uploading,
            timestamp: now,
        }
    }
}

/// Event emitted during the task lifecycle
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Task appended to the queue
    TaskQueued {
        /// Resource URL
        url: String,
    },

    /// Retrieval started for a task
    FetchStarted {
        /// Resource URL
        url: String,
    },

    /// Task finished successfully
    TaskFinished {
        /// Resource URL
        url: String,
    },

    /// Retrieval failed; the task stays `Uploading` and the queue stalls
    FetchFailed {
        /// Resource URL
        url: String,
        /// Diagnostic from the external tool
        reason: String,
    },
}
