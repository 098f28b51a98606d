//! Content Enrichment Pipeline
//!
//! Given a raw URL, produce a structured content analysis (title,
//! description, tags, quality scores, topics) suitable for auto-filling a
//! bookmark record.
//!
//! # Design Philosophy
//!
//! **"Never throw, always degrade"**
//!
//! The pipeline fetches untrusted third-party pages: timeouts, bot
//! challenges, JSON served as HTML, models answering in prose. Every one
//! of those failures is resolved internally - [`Enricher::analyze_url`]
//! always resolves to a well-formed [`AiAnalysis`], and a fallback record
//! (all-zero scores, sentinel tags, `metadata.error`) is the only failure
//! signal. A flaky page can never break the bookmark-creation flow.
//!
//! # Usage
//!
//! ```rust,ignore
//! use enrichment::{Enricher, HttpFetcher, OEmbedResolver};
//! use enrichment::ai::OpenAiModel;
//!
//! let enricher = Enricher::new(
//!     HttpFetcher::new()?,
//!     OpenAiModel::from_env()?,
//!     OEmbedResolver::new()?,
//! );
//!
//! let analysis = enricher.analyze_url("https://example.com/article").await;
//! println!("{} {:?}", analysis.title, analysis.tags);
//! ```
//!
//! # Modules
//!
//! - [`pipeline`] - Orchestration: retry state machine, prompts, parsing,
//!   validation, fallback generation
//! - [`extract`] - HTML classification and content extraction
//! - [`fetch`] - Timed, SSRF-validated HTTP fetching
//! - [`video`] - Video-platform resolution path
//! - [`traits`] - Seams for fetch/model/video/attempts/debug providers
//! - [`ai`] - Model provider implementations (OpenAI)
//! - [`security`] - SSRF rules and credential handling
//! - [`testing`] - Scripted mocks for applications testing against the
//!   pipeline

pub mod ai;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;
pub mod video;

// Re-export core types at crate root
pub use config::EnrichmentConfig;
pub use error::{
    EnrichError, EnrichResult, ExtractError, FetchError, FetchResult, ModelError, ModelResult,
    SecurityError,
};
pub use traits::{
    attempts::{AttemptStore, MemoryAttemptStore},
    fetcher::PageFetcher,
    model::AnalysisModel,
    sink::{ArtifactKind, DebugSink, MemorySink, NoopSink},
    video::VideoResolver,
};
pub use types::{
    analysis::{AiAnalysis, AnalysisMetadata, ContentQuality, Recommendations},
    page::{ContentKind, PageContent, PageMetadata, RawResponse, VideoDetails},
};

// Re-export the pipeline entry point and its building blocks
pub use pipeline::{
    fallback_analysis, Enricher, RetryPolicy, TAG_ANALYSIS_FAILED, TAG_INVALID_URL,
    TAG_RETRY_NEEDED,
};

// Re-export implementations
pub use fetch::HttpFetcher;
pub use normalize::normalize_url;
pub use security::UrlValidator;
pub use video::OEmbedResolver;
