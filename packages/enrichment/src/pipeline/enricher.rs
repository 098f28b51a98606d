//! The Enricher - main entry point for the enrichment pipeline.
//!
//! `analyze_url` is the one operation the bookmark layer consumes. Its
//! contract: for any input string, valid or not, it resolves to a
//! well-formed [`AiAnalysis`] and never returns an error. A flaky
//! third-party page must never break bookmark creation; the only failure
//! signal is `metadata.error` on a fallback record.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::EnrichmentConfig;
use crate::error::{EnrichResult, ExtractError, ModelError};
use crate::extract;
use crate::normalize::normalize_url;
use crate::pipeline::fallback::fallback_analysis;
use crate::pipeline::retry::{self, AttemptState, RetryPolicy, Transition};
use crate::pipeline::{parse, prompts, validate};
use crate::traits::sink::ArtifactKind;
use crate::traits::{
    AnalysisModel, AttemptStore, DebugSink, MemoryAttemptStore, NoopSink, PageFetcher,
    VideoResolver,
};
use crate::types::analysis::AiAnalysis;
use crate::types::page::PageContent;
use crate::video;

/// Content enrichment pipeline over pluggable fetch/model/video providers.
///
/// # Example
///
/// ```rust,ignore
/// use enrichment::{Enricher, HttpFetcher, OEmbedResolver};
/// use enrichment::ai::OpenAiModel;
///
/// let enricher = Enricher::new(
///     HttpFetcher::new()?,
///     OpenAiModel::from_env()?,
///     OEmbedResolver::new()?,
/// );
///
/// // Never fails; inspect metadata.error for fallback records.
/// let analysis = enricher.analyze_url("https://example.com/article").await;
/// ```
pub struct Enricher<F: PageFetcher, M: AnalysisModel, V: VideoResolver> {
    fetcher: F,
    model: M,
    video: V,
    attempts: Arc<dyn AttemptStore>,
    sink: Arc<dyn DebugSink>,
    config: EnrichmentConfig,
}

impl<F: PageFetcher, M: AnalysisModel, V: VideoResolver> Enricher<F, M, V> {
    /// Create an enricher with default config, an in-process attempt store
    /// and no debug sink.
    pub fn new(fetcher: F, model: M, video: V) -> Self {
        Self {
            fetcher,
            model,
            video,
            attempts: Arc::new(MemoryAttemptStore::new()),
            sink: Arc::new(NoopSink),
            config: EnrichmentConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: EnrichmentConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the attempt store (e.g. with a persistent one).
    pub fn with_attempt_store(mut self, store: Arc<dyn AttemptStore>) -> Self {
        self.attempts = store;
        self
    }

    /// Attach a debug sink for troubleshooting artifacts.
    pub fn with_debug_sink(mut self, sink: Arc<dyn DebugSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Access the underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Access the underlying model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Access the underlying video resolver.
    pub fn video_resolver(&self) -> &V {
        &self.video
    }

    /// Analyze a URL into a structured content analysis.
    ///
    /// Never fails: every internal error resolves to a fallback record.
    pub async fn analyze_url(&self, raw_url: &str) -> AiAnalysis {
        let cancel = CancellationToken::new();
        self.analyze_url_with_cancel(raw_url, &cancel).await
    }

    /// `analyze_url` with a caller-supplied cancellation token.
    ///
    /// Cancellation aborts the in-flight network call; a cancelled
    /// invocation still resolves to a fallback record.
    pub async fn analyze_url_with_cancel(
        &self,
        raw_url: &str,
        cancel: &CancellationToken,
    ) -> AiAnalysis {
        // The attempt counter keys on the normalized URL so `example.com`
        // and `https://example.com/` share a history. Unnormalizable input
        // keys on the trimmed raw string.
        let normalized = normalize_url(raw_url);
        let key = match &normalized {
            Ok(url) => url.clone(),
            Err(_) => raw_url.trim().to_string(),
        };
        let attempts = self.attempts.record(&key);

        info!(url = %key, attempts, "enrichment starting");

        let result = match normalized {
            Ok(url) => self.try_analyze(&url, attempts, cancel).await,
            Err(error) => Err(error.into()),
        };

        match result {
            Ok(analysis) => {
                debug_assert!(analysis.is_well_formed());
                info!(url = %key, tags = analysis.tags.len(), "enrichment complete");
                analysis
            }
            Err(error) => {
                warn!(url = %key, error = %error, "enrichment failed, producing fallback record");
                fallback_analysis(&key, &error, attempts)
            }
        }
    }

    /// The fallible pipeline body.
    async fn try_analyze(
        &self,
        url: &str,
        attempts: u32,
        cancel: &CancellationToken,
    ) -> EnrichResult<AiAnalysis> {
        let page = if video::is_video_host(url) {
            self.resolve_video(url, cancel).await?
        } else {
            self.fetch_and_extract(url, cancel).await?
        };

        self.sink
            .record(url, ArtifactKind::ExtractedContent, &page.content);

        let raw = self.request_analysis(&page).await?;
        self.sink.record(url, ArtifactKind::ModelResponse, &raw);

        let parsed = parse::parse_analysis(&raw)?;
        Ok(validate::normalize_analysis(
            parsed,
            &page,
            attempts,
            &self.config,
        ))
    }

    /// Fetch + extract under the bounded-retry state machine.
    ///
    /// Bot detection gets a single alternate pass over the social-preview
    /// tags of the challenge page instead of a same-strategy retry.
    async fn fetch_and_extract(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> EnrichResult<PageContent> {
        let policy = RetryPolicy::new(self.config.max_retries, self.config.initial_backoff);
        let mut state = AttemptState::Attempting { attempt: 0 };
        let mut last_html: Option<String> = None;

        loop {
            let error = match self.fetch_extract_once(url, cancel, &mut last_html).await {
                Ok(page) => return Ok(page),
                Err(error) => error,
            };

            let (next, transition) = policy.on_failure(state, retry::classify(&error));
            state = next;

            match transition {
                Transition::Retry { delay } => {
                    debug!(
                        url = %url,
                        error = %error,
                        delay_ms = delay.as_millis() as u64,
                        "transient failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Transition::Degrade => {
                    if let Some(html) = &last_html {
                        if let Some(page) = extract::preview_page(html, url) {
                            warn!(url = %url, "bot detection hit, using social-preview metadata");
                            return Ok(page);
                        }
                    }
                    return Err(error);
                }
                Transition::GiveUp => return Err(error),
            }
        }
    }

    /// One fetch + extraction attempt. Keeps the raw HTML around for the
    /// bot-detection degraded pass.
    async fn fetch_extract_once(
        &self,
        url: &str,
        cancel: &CancellationToken,
        last_html: &mut Option<String>,
    ) -> EnrichResult<PageContent> {
        let response = self.fetcher.fetch(url, cancel).await?;
        self.sink.record(url, ArtifactKind::RawHtml, &response.body);
        *last_html = Some(response.body.clone());

        let page = extract::extract_page(&response.body, url, &self.config)?;
        Ok(page)
    }

    /// Video-platform path: resolver first, social-preview scrape second.
    async fn resolve_video(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> EnrichResult<PageContent> {
        match self.video.resolve(url).await {
            Ok(details) if details.is_usable() => {
                debug!(url = %url, resolver = self.video.name(), "video resolved");
                return Ok(video::page_from_details(url, details, &self.config));
            }
            Ok(_) => {
                debug!(url = %url, "video resolver returned nothing usable");
            }
            Err(error) => {
                debug!(url = %url, error = %error, "video resolver failed");
            }
        }

        // Video watch pages scrape poorly and trip bot detection, so the
        // degraded path only trusts their social-preview tags.
        let response = self.fetcher.fetch(url, cancel).await?;
        self.sink.record(url, ArtifactKind::RawHtml, &response.body);

        extract::preview_page(&response.body, url)
            .ok_or_else(|| ExtractError::NoContent { url: url.into() }.into())
    }

    /// Build the prompt and call the model, retrying empty/transient
    /// responses under the same bounded policy as the fetch.
    async fn request_analysis(&self, page: &PageContent) -> EnrichResult<String> {
        let policy = RetryPolicy::new(self.config.max_retries, self.config.initial_backoff);
        let mut state = AttemptState::Attempting { attempt: 0 };
        let user_prompt = prompts::format_analysis_prompt(page, self.config.max_prompt_chars);

        loop {
            let error = match self
                .model
                .generate(prompts::ANALYSIS_SYSTEM_PROMPT, &user_prompt)
                .await
            {
                Ok(text) if !text.trim().is_empty() => return Ok(text),
                Ok(_) => ModelError::EmptyResponse.into(),
                Err(error) => error.into(),
            };

            let (next, transition) = policy.on_failure(state, retry::classify(&error));
            state = next;

            match transition {
                Transition::Retry { delay } => {
                    debug!(
                        url = %page.url,
                        error = %error,
                        delay_ms = delay.as_millis() as u64,
                        "model call failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                _ => return Err(error),
            }
        }
    }
}
