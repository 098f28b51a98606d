//! Model trait - the external structured-generation service.

use async_trait::async_trait;

use crate::error::ModelResult;

/// Structured-generation service abstraction.
///
/// Implementations wrap a specific LLM provider and are expected to run at
/// low temperature under a fixed max-token budget - the pipeline asks for a
/// JSON object and repairs whatever comes back, so determinism matters more
/// than prose quality.
///
/// A single call, no retries: transient failures surface as
/// `ModelError::Service` and the pipeline decides whether to re-enter.
#[async_trait]
pub trait AnalysisModel: Send + Sync {
    /// Generate a completion for the given system and user prompts.
    ///
    /// Returns the raw response text; parsing and validation happen in the
    /// pipeline. Must return `ModelError::EmptyResponse` rather than an
    /// empty string.
    async fn generate(&self, system: &str, user: &str) -> ModelResult<String>;

    /// Model name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
