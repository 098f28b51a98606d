//! HTTP fetcher - one GET with a hard deadline.
//!
//! Sends a browser-like header set to get past trivial user-agent
//! filtering. Validates the URL against SSRF rules before the request
//! leaves the process. Enforces the deadline over the whole
//! request+body-read, racing a caller-supplied cancellation token.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::security::UrlValidator;
use crate::traits::fetcher::PageFetcher;
use crate::types::page::RawResponse;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Content types the extractor can work with.
const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// HTTP fetcher with SSRF validation and a hard deadline.
pub struct HttpFetcher {
    client: reqwest::Client,
    validator: UrlValidator,
    deadline: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with browser-like defaults and a 30s deadline.
    pub fn new() -> FetchResult<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .parse()
                .expect("static header value"),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            "en-US,en;q=0.5".parse().expect("static header value"),
        );
        headers.insert(
            reqwest::header::UPGRADE_INSECURE_REQUESTS,
            "1".parse().expect("static header value"),
        );

        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::Transport(Box::new(e)))?;

        Ok(Self {
            client,
            validator: UrlValidator::new(),
            deadline: Duration::from_secs(30),
        })
    }

    /// Set the hard deadline for a single fetch.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Replace the SSRF validator.
    pub fn with_validator(mut self, validator: UrlValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Use a custom client (for proxies, cookie jars, tests).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Issue the request and read the body. Runs inside the deadline.
    async fn fetch_inner(&self, url: &str) -> FetchResult<RawResponse> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            FetchError::Transport(Box::new(e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        if let Some(ct) = &content_type {
            let base = ct.split(';').next().unwrap_or("").trim().to_lowercase();
            if !HTML_CONTENT_TYPES.contains(&base.as_str()) {
                return Err(FetchError::UnsupportedContentType { content_type: base });
            }
        }

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.into())))
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(Box::new(e)))?;

        Ok(RawResponse {
            url: final_url,
            status: status.as_u16(),
            content_type,
            body,
            headers,
            fetched_at: Utc::now(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, cancel: &CancellationToken) -> FetchResult<RawResponse> {
        self.validator.validate(url)?;

        debug!(url = %url, deadline_ms = self.deadline.as_millis() as u64, "fetch starting");

        tokio::select! {
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = tokio::time::timeout(self.deadline, self.fetch_inner(url)) => {
                match result {
                    Ok(inner) => inner,
                    Err(_) => Err(FetchError::Timeout { url: url.into() }),
                }
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
