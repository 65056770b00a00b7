//! Expiration sweeper — lazy, pull-based pruning of old finished tasks.
//!
//! Triggered only as a side effect of status reads, never on a timer.

use super::UploadService;
use crate::types::TaskStatus;
use chrono::{DateTime, Duration, Utc};

impl UploadService {
    /// Prune finished tasks older than the configured expiration horizon.
    ///
    /// Called by the API facade before every status read.
    pub async fn delete_expired_tasks(&self) {
        self.sweep_expired_at(Utc::now()).await
    }

    /// Prune finished tasks older than the horizon relative to `now`.
    ///
    /// The sweep counts finished tasks with a timestamp strictly before the
    /// cutoff and removes that many entries from the front of the sequence.
    /// Tasks finish in submission order under the single-lane scheduler, so
    /// expired finished tasks are always contiguous at the front; the
    /// count-then-truncate step relies on that ordering. If execution were
    /// ever parallelized, this step would have to be revisited first.
    pub async fn sweep_expired_at(&self, now: DateTime<Utc>) {
        let horizon = Duration::minutes(self.config.expiration_finished_tasks_minutes);

        let mut store = self.store.lock().await;

        let finished = store.filter(|t| t.status == TaskStatus::Finished);
        if finished.is_empty() {
            return;
        }

        let cutoff = now - horizon;
        let expired = store
            .filter(|t| t.status == TaskStatus::Finished && t.timestamp < cutoff)
            .len();

        if expired > 0 {
            tracing::debug!(count = expired, "Deleting expired finished tasks");
        }
        store.remove_prefix(expired);
    }
}
