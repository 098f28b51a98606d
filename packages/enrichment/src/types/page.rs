//! Fetch-stage types - raw responses and extracted page content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A raw HTTP response before extraction.
///
/// Carries the final URL after redirects plus enough of the response to
/// classify and extract from it.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Final URL after redirects
    pub url: String,

    /// HTTP status code
    pub status: u16,

    /// Content-Type header if present
    pub content_type: Option<String>,

    /// Response body as text
    pub body: String,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// When the response was received
    pub fetched_at: DateTime<Utc>,
}

impl RawResponse {
    /// Create a new raw response with minimal fields.
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: 200,
            content_type: Some("text/html".to_string()),
            body: body.into(),
            headers: HashMap::new(),
            fetched_at: Utc::now(),
        }
    }

    /// Set the status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Content classification assigned during extraction.
///
/// The kind drives prompt selection and the per-kind output policy: video
/// analyses get a larger tag budget to capture transcript-derived
/// vocabulary, articles get a longer description cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Webpage,
    Article,
    Product,
    Video,
}

impl Default for ContentKind {
    fn default() -> Self {
        Self::Webpage
    }
}

impl ContentKind {
    /// Maximum number of tags the validator keeps for this kind.
    pub fn tag_budget(&self) -> usize {
        match self {
            ContentKind::Video => 15,
            _ => 5,
        }
    }

    /// Maximum description length for this kind.
    pub fn description_cap(&self) -> usize {
        match self {
            ContentKind::Webpage | ContentKind::Product => 160,
            ContentKind::Article | ContentKind::Video => 300,
        }
    }
}

/// Best-effort page metadata pulled from standard meta tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Author name if declared
    pub author: Option<String>,

    /// Publish date (ISO string as served, not re-parsed)
    pub publish_date: Option<String>,

    /// Last-modified date
    pub last_modified: Option<String>,

    /// Hero/preview image URL
    pub main_image: Option<String>,

    /// Word count of the extracted body text
    pub word_count: Option<usize>,
}

impl PageMetadata {
    /// Whether any field is populated.
    pub fn is_empty(&self) -> bool {
        self.author.is_none()
            && self.publish_date.is_none()
            && self.last_modified.is_none()
            && self.main_image.is_none()
            && self.word_count.is_none()
    }
}

/// Extracted, cleaned page content ready for analysis.
///
/// Created once per fetch attempt, never mutated afterwards, and discarded
/// once the analysis is produced.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Normalized source URL
    pub url: String,

    /// Best-effort title (empty string if absent, never missing)
    pub title: String,

    /// Best-effort description (empty string if absent)
    pub description: String,

    /// Cleaned body text, length-capped
    pub content: String,

    /// Content classification
    pub kind: ContentKind,

    /// Best-effort metadata
    pub metadata: PageMetadata,

    /// When the underlying response was fetched
    pub fetched_at: DateTime<Utc>,
}

impl PageContent {
    /// Create page content with minimal fields.
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            description: String::new(),
            content: content.into(),
            kind: ContentKind::Webpage,
            metadata: PageMetadata::default(),
            fetched_at: Utc::now(),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the content kind.
    pub fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether the body text carries anything analyzable.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// Resolver output for a video-platform URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoDetails {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publish_date: Option<String>,
    pub description: Option<String>,
    pub transcript: Option<String>,
    pub thumbnail: Option<String>,
}

impl VideoDetails {
    /// Whether the resolver produced anything usable.
    pub fn is_usable(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.transcript.is_some()
    }
}
