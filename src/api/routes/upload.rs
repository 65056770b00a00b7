//! Upload queue handlers.

use crate::api::AppState;
use crate::error::ApiError;
use crate::types::FetchRequest;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// GET /upload/status - List all tasks in submission order
///
/// Reading the status doubles as the expiration trigger: finished tasks
/// older than the configured horizon are pruned before the snapshot is
/// taken, so the response never contains expired entries.
#[utoipa::path(
    get,
    path = "/upload/status",
    tag = "upload",
    responses(
        (status = 200, description = "All tasks in submission order", body = [crate::types::Task]),
        (status = 401, description = "Missing or invalid authorization token", body = crate::error::ApiError)
    )
)]
pub async fn upload_status(State(state): State<AppState>) -> impl IntoResponse {
    state.service.delete_expired_tasks().await;

    let tasks = state.service.tasks().await;
    (StatusCode::OK, Json(tasks))
}

/// POST /upload - Submit a URL for retrieval
///
/// Accepts the request immediately; retrieval happens asynchronously, one
/// task at a time. The caller observes progress through `/upload/status`.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "upload",
    request_body = crate::types::FetchRequest,
    responses(
        (status = 200, description = "Task accepted and queued"),
        (status = 401, description = "Missing or invalid authorization token", body = crate::error::ApiError),
        (status = 422, description = "URL is missing or empty", body = crate::error::ApiError)
    )
)]
pub async fn add_upload(
    State(state): State<AppState>,
    Json(request): Json<FetchRequest>,
) -> Response {
    if request.url.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiError::validation("URL is empty.")),
        )
            .into_response();
    }

    tracing::info!(url = %request.url, "Queueing upload");
    state.service.queue_request(request).await;

    (StatusCode::OK, "OK").into_response()
}
