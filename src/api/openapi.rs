//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the music-fetch REST API
//! using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the music-fetch REST API
///
/// The generated spec describes all available endpoints and
/// request/response types, and is served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "music-fetch REST API",
        version = "0.1.0",
        description = "REST API for queueing music retrieval tasks and monitoring their progress",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Local server")
    ),
    paths(
        crate::api::routes::upload_status,
        crate::api::routes::add_upload,
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        // Core types from types.rs
        crate::types::Task,
        crate::types::TaskStatus,
        crate::types::FetchRequest,
        crate::types::Event,

        // Error types from error.rs
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "upload", description = "Upload queue - Submit retrieval tasks and monitor their status"),
        (name = "system", description = "System endpoints - Health check and OpenAPI spec"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security addon to add the shared-token authentication scheme to the spec
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = &mut openapi.components {
            components.add_security_scheme(
                "auth_token",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new("Authorization"),
                    ),
                ),
            );
        }
    }
}
