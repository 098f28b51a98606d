//! Video resolver trait - platform-specific metadata resolution.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::page::VideoDetails;

/// Resolves rich metadata for a video-platform URL.
///
/// Video pages are disproportionately likely to serve bot-detection
/// challenges to generic scrapers, so the pipeline routes known video hosts
/// through this platform-specific path instead of HTML extraction. The
/// service behind it is a black box; failures degrade to social-preview
/// scraping rather than aborting the invocation.
#[async_trait]
pub trait VideoResolver: Send + Sync {
    /// Resolve title/creator/date/description/transcript for a video URL.
    async fn resolve(&self, url: &str) -> FetchResult<VideoDetails>;

    /// Resolver name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
