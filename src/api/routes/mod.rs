//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`upload`] — Upload queue operations
//! - [`system`] — Health check and OpenAPI spec

mod system;
mod upload;

// Re-export all handlers so `routes::function_name` continues to work
pub use system::*;
pub use upload::*;
