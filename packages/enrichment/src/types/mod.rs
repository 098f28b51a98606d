//! Data types for the enrichment pipeline.

pub mod analysis;
pub mod page;

pub use analysis::{AiAnalysis, AnalysisMetadata, ContentQuality, Recommendations};
pub use page::{ContentKind, PageContent, PageMetadata, RawResponse, VideoDetails};
