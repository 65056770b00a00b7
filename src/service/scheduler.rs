//! Queue scheduler — single-lane, first-submitted-first-executed.
//!
//! One spawned worker task owns queue progression. The worker exists only
//! while uploads remain; the handoff points (start on enqueue, advance on
//! completion) are decided under the store mutex so two callers can never
//! both conclude "the lane is idle, start one".

use super::UploadService;
use crate::types::{Event, FetchRequest, Task, TaskStatus};
use chrono::Utc;

impl UploadService {
    /// Append a request to the queue.
    ///
    /// The task is created in the `Uploading` state with the current time.
    /// If the queue was idle (this task is the only one uploading after the
    /// append), retrieval starts immediately; otherwise the task waits and
    /// is started automatically once everything ahead of it completes.
    ///
    /// URL validation is the API facade's responsibility; an empty URL is
    /// rejected there and never reaches this method.
    ///
    /// # Stall semantics
    ///
    /// If a retrieval fails, its task stays `Uploading` forever and no
    /// subsequent task executes until the process restarts. There is no
    /// retry, no failed status, and no timeout. This reproduces the
    /// behavior of the system this service replaces; see DESIGN.md for the
    /// policy decision.
    pub async fn queue_request(&self, request: FetchRequest) {
        let start_now = {
            let mut store = self.store.lock().await;
            store.append(Task::new(request.clone(), Utc::now()));
            // Exactly one uploading task means the lane was idle before this
            // append. After a stall the count can never drop back to one, so
            // a stalled queue is never restarted here.
            store.uploading_count() == 1
        };

        tracing::debug!(url = %request.url, start_now, "Task queued");
        self.emit_event(Event::TaskQueued {
            url: request.url.clone(),
        });

        if start_now {
            self.spawn_worker();
        }
    }

    /// Spawn the single worker that drains the queue
    fn spawn_worker(&self) {
        let service = self.clone();
        tokio::spawn(async move { service.run_worker().await });
    }

    /// Run retrievals until no `Uploading` task remains or one fails.
    ///
    /// Invariant: at most one worker runs at a time. The completion mark and
    /// the check for a successor happen under one lock acquisition, pairing
    /// with the count-equals-one start condition in [`Self::queue_request`]:
    /// while a successor exists the uploading count never reaches zero, so
    /// no enqueue can spawn a second worker; once no successor exists this
    /// worker exits without touching the store again.
    async fn run_worker(self) {
        loop {
            let request = {
                let store = self.store.lock().await;
                match store.first_uploading() {
                    Some(task) => task.request.clone(),
                    None => break,
                }
            };

            tracing::debug!(url = %request.url, "Starting download");
            self.emit_event(Event::FetchStarted {
                url: request.url.clone(),
            });

            // Long-lived call; no lock held, so status reads and enqueues
            // stay responsive.
            match self.fetcher.fetch(&request).await {
                Ok(()) => {
                    let has_next = {
                        let mut store = self.store.lock().await;
                        store.finish_first_uploading(Utc::now());
                        store.first_uploading().is_some()
                    };

                    tracing::debug!(url = %request.url, "Finished download");
                    self.emit_event(Event::TaskFinished {
                        url: request.url.clone(),
                    });

                    if !has_next {
                        break;
                    }
                }
                Err(e) => {
                    // The task stays Uploading and the queue stalls until
                    // the process restarts.
                    tracing::error!(url = %request.url, error = %e, "Fetch failed; queue stalled");
                    self.emit_event(Event::FetchFailed {
                        url: request.url,
                        reason: e.to_string(),
                    });
                    break;
                }
            }
        }
    }

    /// Ordered subsequence of tasks still in the `Uploading` state
    pub async fn ongoing_tasks(&self) -> Vec<Task> {
        self.store
            .lock()
            .await
            .filter(|t| t.status == TaskStatus::Uploading)
            .into_iter()
            .cloned()
            .collect()
    }
}
