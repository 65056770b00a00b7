//! Fetcher trait definition

use crate::error::Result;
use crate::types::FetchRequest;
use async_trait::async_trait;

/// Performs the actual fetch-and-tag operation for one task.
///
/// An implementation retrieves the resource named by the request's URL into
/// the music directory and applies the optional tag metadata. The call
/// resolves only when the operation has completed; the scheduler does not
/// advance the queue until then.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Run the retrieval for one request.
    ///
    /// # Errors
    ///
    /// Returns an error with a diagnostic when the retrieval fails. The
    /// scheduler does not retry; see the queue stall semantics in
    /// [`crate::service::UploadService`].
    async fn fetch(&self, request: &FetchRequest) -> Result<()>;

    /// Implementation name for logging
    fn name(&self) -> &'static str;
}
