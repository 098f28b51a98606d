//! Typed errors for the enrichment pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Each failure domain gets
//! its own enum; `EnrichError` is the umbrella the pipeline routes on.

use thiserror::Error;

/// Errors raised while normalizing or fetching a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Input string is not a usable URL
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Security validation failed (SSRF protection)
    #[error("security error: {0}")]
    Security(#[from] SecurityError),

    /// The fetch deadline expired
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Non-2xx HTTP response
    #[error("HTTP {status}")]
    Http { status: u16 },

    /// Response content type is not HTML-compatible
    #[error("unsupported content type: {content_type}")]
    UnsupportedContentType { content_type: String },

    /// Transport-level failure (DNS, connect, reset)
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The caller's cancellation token fired
    #[error("fetch cancelled")]
    Cancelled,
}

/// Errors raised while parsing a fetched payload into page content.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Payload is below the minimum byte threshold for a real page
    #[error("response too short: {bytes} bytes")]
    EmptyOrShort { bytes: usize },

    /// Payload lacks HTML document markers (likely JSON or an error body)
    #[error("payload is not an HTML document")]
    InvalidHtml,

    /// The page is a CAPTCHA or verification challenge, not real content
    #[error("bot detection page matched: {phrase:?}")]
    BotDetected { phrase: String },

    /// Nothing usable remained after boilerplate removal
    #[error("no content found: {url}")]
    NoContent { url: String },
}

/// Errors raised by the structured-generation model call and its parsing.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Model returned no text at all
    #[error("empty model response")]
    EmptyResponse,

    /// Model output could not be repaired into the analysis schema
    #[error("malformed analysis: {reason}")]
    MalformedAnalysis { reason: String },

    /// Model service unavailable or failed (rate limit, network, 5xx)
    #[error("model service error: {0}")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Security-related errors, primarily for SSRF protection.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// URL scheme not allowed (e.g., file://, ftp://)
    #[error("disallowed URL scheme: {0}")]
    DisallowedScheme(String),

    /// Host is blocked (e.g., localhost, internal IPs)
    #[error("blocked host: {0}")]
    BlockedHost(String),

    /// IP in blocked CIDR range (e.g., 10.0.0.0/8)
    #[error("blocked IP range: {0}")]
    BlockedCidr(String),

    /// URL has no host
    #[error("URL has no host")]
    NoHost,

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Umbrella error the pipeline routes on.
///
/// None of these variants escape `Enricher::analyze_url`; every one of
/// them resolves to a fallback record instead.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl EnrichError {
    /// Whether retrying the same strategy can plausibly succeed.
    ///
    /// Timeouts, HTTP failures, transport errors, truncated payloads and
    /// empty model responses are transient. Bad input, non-HTML payloads
    /// and schema-level failures are not.
    pub fn is_transient(&self) -> bool {
        match self {
            EnrichError::Fetch(e) => matches!(
                e,
                FetchError::Timeout { .. } | FetchError::Http { .. } | FetchError::Transport(_)
            ),
            EnrichError::Extract(e) => matches!(e, ExtractError::EmptyOrShort { .. }),
            EnrichError::Model(e) => {
                matches!(e, ModelError::EmptyResponse | ModelError::Service(_))
            }
        }
    }

    /// Whether this is a bot-detection/CAPTCHA failure.
    pub fn is_bot_detection(&self) -> bool {
        matches!(self, EnrichError::Extract(ExtractError::BotDetected { .. }))
    }

    /// Whether the original input was not a usable URL.
    pub fn is_invalid_url(&self) -> bool {
        matches!(
            self,
            EnrichError::Fetch(FetchError::InvalidUrl { .. })
                | EnrichError::Fetch(FetchError::Security(_))
        )
    }
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for model operations.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Result type alias for security operations.
pub type SecurityResult<T> = std::result::Result<T, SecurityError>;

/// Result type alias for whole-pipeline operations.
pub type EnrichResult<T> = std::result::Result<T, EnrichError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        let timeout: EnrichError = FetchError::Timeout {
            url: "https://example.com".into(),
        }
        .into();
        assert!(timeout.is_transient());

        let http: EnrichError = FetchError::Http { status: 503 }.into();
        assert!(http.is_transient());

        let bad_type: EnrichError = FetchError::UnsupportedContentType {
            content_type: "application/json".into(),
        }
        .into();
        assert!(!bad_type.is_transient());

        let empty_model: EnrichError = ModelError::EmptyResponse.into();
        assert!(empty_model.is_transient());

        let malformed: EnrichError = ModelError::MalformedAnalysis {
            reason: "missing title".into(),
        }
        .into();
        assert!(!malformed.is_transient());
    }

    #[test]
    fn bot_detection_is_not_transient() {
        let bot: EnrichError = ExtractError::BotDetected {
            phrase: "captcha".into(),
        }
        .into();
        assert!(!bot.is_transient());
        assert!(bot.is_bot_detection());
    }

    #[test]
    fn invalid_url_classification() {
        let invalid: EnrichError = FetchError::InvalidUrl {
            url: "not a url".into(),
        }
        .into();
        assert!(invalid.is_invalid_url());
        assert!(!invalid.is_transient());
    }
}
