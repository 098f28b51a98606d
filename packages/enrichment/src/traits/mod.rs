//! Core trait abstractions for the enrichment pipeline.
//!
//! Every external dependency sits behind a trait so the pipeline can run
//! against mocks in tests and against swappable providers in production:
//!
//! - [`fetcher::PageFetcher`] - HTTP fetch with a hard deadline
//! - [`model::AnalysisModel`] - structured-generation (LLM) service
//! - [`video::VideoResolver`] - video-platform metadata resolution
//! - [`attempts::AttemptStore`] - per-URL attempt counting
//! - [`sink::DebugSink`] - optional troubleshooting artifact store

pub mod attempts;
pub mod fetcher;
pub mod model;
pub mod sink;
pub mod video;

pub use attempts::{AttemptStore, MemoryAttemptStore};
pub use fetcher::PageFetcher;
pub use model::AnalysisModel;
pub use sink::{DebugSink, MemorySink, NoopSink};
pub use video::VideoResolver;
