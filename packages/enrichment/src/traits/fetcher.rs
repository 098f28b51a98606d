//! Fetcher trait - a single, cancellable HTTP attempt.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::FetchResult;
use crate::types::page::RawResponse;

/// A single network fetch with a hard deadline.
///
/// Implementations perform exactly one GET; retry policy belongs to the
/// pipeline, not here. The cancellation token aborts an in-flight request
/// cooperatively; the deadline is implementation configuration.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a URL, resolving to the final response after redirects.
    async fn fetch(&self, url: &str, cancel: &CancellationToken) -> FetchResult<RawResponse>;

    /// Fetcher name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
