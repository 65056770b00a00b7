//! API integration tests.
//!
//! Each test builds the real router around a service wired to a scripted
//! fetcher and drives it with `tower::ServiceExt::oneshot`, so no TCP
//! listener is involved.


use crate::api::create_router;
use crate::config::Config;
use crate::service::test_helpers::{FetchCall, create_test_service_with_config};
use axum::Router;
use std::sync::Arc;
use tokio::sync::mpsc;

pub(crate) const TEST_TOKEN: &str = "test-token";

/// Build a router with authentication enabled, plus the service and the
/// fetcher invocation stream behind it.
pub(crate) fn create_test_app() -> (
    Router,
    Arc<crate::UploadService>,
    mpsc::UnboundedReceiver<FetchCall>,
) {
    let config = Config {
        server: crate::config::ServerConfig {
            auth_token: Some(TEST_TOKEN.to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let (service, calls) = create_test_service_with_config(config);
    let service = Arc::new(service);
    let config = service.get_config();
    let app = create_router(service.clone(), config);
    (app, service, calls)
}
