//! Configuration for the enrichment pipeline.
//!
//! All numeric thresholds the pipeline depends on live here so deployments
//! can tune them without code changes. Defaults favor resilience over
//! throughput.

use std::time::Duration;

/// Tunable knobs for the enrichment pipeline.
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Maximum retry attempts for transient failures.
    ///
    /// A transient failure (timeout, HTTP error, truncated payload) is
    /// retried up to this many times with exponential backoff before the
    /// invocation falls back. Default: 3.
    pub max_retries: u32,

    /// Base delay for exponential backoff (doubles per attempt, no jitter).
    ///
    /// Attempt `n` waits `initial_backoff * 2^n`. Default: 500ms.
    pub initial_backoff: Duration,

    /// Minimum payload size treated as a real page.
    ///
    /// Anything smaller is assumed to be an error body or an empty shell.
    /// Default: 200 bytes.
    pub min_html_bytes: usize,

    /// Maximum length of the combined `PageContent.content` field.
    ///
    /// Default: 4000 chars.
    pub max_content_chars: usize,

    /// Maximum page content embedded into a model prompt.
    ///
    /// Keeps the request inside the model's context budget. Default: 6000
    /// chars.
    pub max_prompt_chars: usize,

    /// Title cap on the final analysis. Default: 60 chars.
    pub max_title_chars: usize,

    /// Cap on `main_topics`. Default: 5.
    pub max_topics: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            min_html_bytes: 200,
            max_content_chars: 4000,
            max_prompt_chars: 6000,
            max_title_chars: 60,
            max_topics: 5,
        }
    }
}

impl EnrichmentConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum retry count.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base backoff delay.
    pub fn with_initial_backoff(mut self, delay: Duration) -> Self {
        self.initial_backoff = delay;
        self
    }

    /// Set the minimum payload size.
    pub fn with_min_html_bytes(mut self, bytes: usize) -> Self {
        self.min_html_bytes = bytes;
        self
    }

    /// Set the content length cap.
    pub fn with_max_content_chars(mut self, chars: usize) -> Self {
        self.max_content_chars = chars;
        self
    }

    /// Set the prompt content budget.
    pub fn with_max_prompt_chars(mut self, chars: usize) -> Self {
        self.max_prompt_chars = chars;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = EnrichmentConfig::default();
        assert_eq!(config.max_retries, 3);
        assert!(config.max_prompt_chars >= config.max_content_chars);
        assert!(config.min_html_bytes > 0);
    }

    #[test]
    fn builder_overrides() {
        let config = EnrichmentConfig::new()
            .with_max_retries(5)
            .with_initial_backoff(Duration::from_millis(100));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.initial_backoff, Duration::from_millis(100));
    }
}
