//! Authentication middleware for the REST API
//!
//! A single shared static token protects every endpoint. When
//! `ServerConfig::auth_token` is set, each request must carry the exact
//! token in the `Authorization` header or it receives a 401 before any
//! handler runs. No scheme prefix is used; the header value is compared to
//! the configured token as-is.

use crate::error::ApiError;
use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Authentication middleware checking the `Authorization` header against the
/// configured shared token.
///
/// Returns 401 Unauthorized when the token is missing or does not match;
/// otherwise forwards to the next handler. When no token is configured, all
/// requests pass through.
pub async fn require_auth_token(
    State(expected_token): State<Option<String>>,
    request: Request,
    next: Next,
) -> Response {
    // If no token is configured, allow all requests through
    let Some(expected) = expected_token else {
        return next.run(request).await;
    };

    let provided = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    // Constant-time comparison to prevent timing side-channel attacks
    match provided {
        Some(token) if constant_time_eq(token.as_bytes(), expected.as_bytes()) => {
            next.run(request).await
        }
        Some(_) => unauthorized_response("Invalid authorization token"),
        None => unauthorized_response("Missing Authorization header"),
    }
}

/// Constant-time byte comparison to prevent timing side-channel attacks.
/// Always compares all bytes regardless of where the first mismatch occurs.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiError::unauthorized(message)),
    )
        .into_response()
}
