//! Shared helpers for service and API tests.
//!
//! Tests drive the queue through a scripted fetcher: every invocation is
//! surfaced to the test as a [`FetchCall`], and the retrieval completes only
//! when the test sends a result back. This makes "in flight" a state the
//! test controls deterministically.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetcher::Fetcher;
use crate::service::UploadService;
use crate::types::FetchRequest;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// One recorded fetcher invocation, completed by the test via `respond`.
pub(crate) struct FetchCall {
    pub(crate) url: String,
    pub(crate) respond: oneshot::Sender<Result<()>>,
}

/// Fetcher whose invocations are handed to the test for completion
pub(crate) struct ManualFetcher {
    calls: mpsc::UnboundedSender<FetchCall>,
}

#[async_trait]
impl Fetcher for ManualFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.calls
            .send(FetchCall {
                url: request.url.clone(),
                respond: tx,
            })
            .expect("test dropped the call receiver");
        rx.await.expect("test dropped the response sender")
    }

    fn name(&self) -> &'static str {
        "manual-fetcher"
    }
}

/// Create a service wired to a manual fetcher, plus the invocation stream
pub(crate) fn create_test_service() -> (UploadService, mpsc::UnboundedReceiver<FetchCall>) {
    create_test_service_with_config(Config::default())
}

/// Same as [`create_test_service`] but with an explicit configuration
pub(crate) fn create_test_service_with_config(
    config: Config,
) -> (UploadService, mpsc::UnboundedReceiver<FetchCall>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let service = UploadService::with_fetcher(config, std::sync::Arc::new(ManualFetcher { calls: tx }));
    (service, rx)
}

/// Await the next fetcher invocation, failing the test after one second
pub(crate) async fn next_call(calls: &mut mpsc::UnboundedReceiver<FetchCall>) -> FetchCall {
    tokio::time::timeout(Duration::from_secs(1), calls.recv())
        .await
        .expect("timed out waiting for a fetcher invocation")
        .expect("fetcher channel closed")
}

/// Assert that no fetcher invocation arrives within a short grace period
pub(crate) async fn assert_no_call(calls: &mut mpsc::UnboundedReceiver<FetchCall>) {
    let result = tokio::time::timeout(Duration::from_millis(100), calls.recv()).await;
    assert!(
        result.is_err(),
        "fetcher was invoked when no invocation was expected (url: {:?})",
        result.ok().flatten().map(|c| c.url)
    );
}

/// Wait until `condition` over the task snapshot holds, failing after one second
pub(crate) async fn wait_for_tasks(
    service: &UploadService,
    condition: impl Fn(&[crate::types::Task]) -> bool,
) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    loop {
        let tasks = service.tasks().await;
        if condition(&tasks) {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for task state, last snapshot: {:?}",
            tasks
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// A representative external tool failure
pub(crate) fn tool_failure() -> Error {
    Error::ExternalTool("fetch tool exited with exit status: 1".to_string())
}
