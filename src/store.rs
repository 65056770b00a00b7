//! Ordered in-memory task store.
//!
//! The store is an append-only-ordered sequence: insertion order equals
//! submission order and entries are never reordered. The only mutation a
//! task ever undergoes is the single `Uploading` → `Finished` transition,
//! which the store exposes through [`TaskStore::finish_first_uploading`] so
//! callers cannot perform any other edit.

use crate::types::{Task, TaskStatus};
use chrono::{DateTime, Utc};

/// Ordered collection of tasks with status and timestamp.
///
/// Not internally synchronized; the service wraps it in a
/// `tokio::sync::Mutex` and keeps every mutation a brief critical section.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task to the end of the sequence.
    ///
    /// No validation is performed; the caller is responsible for rejecting
    /// invalid requests before a task is created.
    pub fn append(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Read-only view of the full ordered sequence
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Owned copy of the full ordered sequence.
    ///
    /// API reads use this so a response never observes a torn
    /// status/timestamp pair while the worker transitions a task.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Ordered subsequence of tasks matching `predicate`
    pub fn filter<'a>(&'a self, predicate: impl Fn(&Task) -> bool + 'a) -> Vec<&'a Task> {
        self.tasks.iter().filter(|t| predicate(t)).collect()
    }

    /// Number of tasks currently in the `Uploading` state (running or waiting)
    pub fn uploading_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Uploading)
            .count()
    }

    /// Earliest task (by submission order) still in the `Uploading` state.
    ///
    /// Because at most one task is ever in flight, this is always the
    /// currently-running task while the worker is active.
    pub fn first_uploading(&self) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|t| t.status == TaskStatus::Uploading)
    }

    /// Transition the earliest `Uploading` task to `Finished`, overwriting
    /// its timestamp with `now`.
    ///
    /// This is the only mutation the store permits after `append`. Returns
    /// `false` if no task is in the `Uploading` state.
    pub fn finish_first_uploading(&mut self, now: DateTime<Utc>) -> bool {
        match self
            .tasks
            .iter_mut()
            .find(|t| t.status == TaskStatus::Uploading)
        {
            Some(task) => {
                task.status = TaskStatus::Finished;
                task.timestamp = now;
                true
            }
            None => false,
        }
    }

    /// Remove the first `n` entries of the sequence.
    ///
    /// Used by the expiration sweeper to prune the oldest finished entries,
    /// which are contiguous at the front in normal operation.
    pub fn remove_prefix(&mut self, n: usize) {
        let n = n.min(self.tasks.len());
        self.tasks.drain(..n);
    }

    /// Number of tasks in the store
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store holds no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
