//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the enrichment
//! pipeline without making real network or model calls. Mocks are
//! scripted: they replay a queue of responses and record every call for
//! assertions.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{FetchError, FetchResult, ModelError, ModelResult};
use crate::traits::{fetcher::PageFetcher, model::AnalysisModel, video::VideoResolver};
use crate::types::page::{RawResponse, VideoDetails};

/// A scripted fetcher that replays a queue of responses.
///
/// Once the queue is empty, further calls return the configured repeat
/// response (default: transport error). Call instants are recorded with
/// the tokio clock so backoff timing is assertable under a paused runtime.
#[derive(Default)]
pub struct MockFetcher {
    responses: RwLock<VecDeque<FetchResult<RawResponse>>>,
    calls: Arc<RwLock<Vec<MockFetchCall>>>,
}

/// Record of a call made to the mock fetcher.
#[derive(Debug, Clone)]
pub struct MockFetchCall {
    pub url: String,
    pub at: tokio::time::Instant,
}

impl MockFetcher {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful HTML response.
    pub fn with_html(self, body: impl Into<String>) -> Self {
        self.push(Ok(RawResponse::new("https://mock.invalid", body)));
        self
    }

    /// Queue an arbitrary result.
    pub fn with_result(self, result: FetchResult<RawResponse>) -> Self {
        self.push(result);
        self
    }

    /// Queue a timeout error.
    pub fn with_timeout(self) -> Self {
        self.push(Err(FetchError::Timeout {
            url: "https://mock.invalid".into(),
        }));
        self
    }

    /// Queue an HTTP status error.
    pub fn with_status(self, status: u16) -> Self {
        self.push(Err(FetchError::Http { status }));
        self
    }

    fn push(&self, result: FetchResult<RawResponse>) {
        self.responses.write().unwrap().push_back(result);
    }

    /// All calls made to this mock, in order.
    pub fn calls(&self) -> Vec<MockFetchCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of fetches performed.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str, _cancel: &CancellationToken) -> FetchResult<RawResponse> {
        self.calls.write().unwrap().push(MockFetchCall {
            url: url.to_string(),
            at: tokio::time::Instant::now(),
        });

        match self.responses.write().unwrap().pop_front() {
            Some(Ok(mut response)) => {
                // Scripted responses echo the requested URL unless the
                // script set one explicitly.
                if response.url == "https://mock.invalid" {
                    response.url = url.to_string();
                }
                Ok(response)
            }
            Some(Err(error)) => Err(error),
            None => Err(FetchError::Transport(
                "mock fetcher queue exhausted".into(),
            )),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A scripted model that replays a queue of responses.
#[derive(Default)]
pub struct MockModel {
    responses: RwLock<VecDeque<ModelResult<String>>>,
    calls: Arc<RwLock<Vec<MockModelCall>>>,
}

/// Record of a call made to the mock model.
#[derive(Debug, Clone)]
pub struct MockModelCall {
    pub system: String,
    pub user: String,
}

impl MockModel {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response text.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses.write().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queue an error.
    pub fn with_error(self, error: ModelError) -> Self {
        self.responses.write().unwrap().push_back(Err(error));
        self
    }

    /// All calls made to this mock, in order.
    pub fn calls(&self) -> Vec<MockModelCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of generate calls performed.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl AnalysisModel for MockModel {
    async fn generate(&self, system: &str, user: &str) -> ModelResult<String> {
        self.calls.write().unwrap().push(MockModelCall {
            system: system.to_string(),
            user: user.to_string(),
        });

        match self.responses.write().unwrap().pop_front() {
            Some(result) => result,
            None => Err(ModelError::Service("mock model queue exhausted".into())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A video resolver with a single fixed outcome.
#[derive(Default)]
pub struct MockVideoResolver {
    result: RwLock<Option<FetchResult<VideoDetails>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockVideoResolver {
    /// Create a resolver that fails every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every call to the given details.
    pub fn with_details(self, details: VideoDetails) -> Self {
        *self.result.write().unwrap() = Some(Ok(details));
        self
    }

    /// Fail every call with the given error.
    pub fn with_error(self, error: FetchError) -> Self {
        *self.result.write().unwrap() = Some(Err(error));
        self
    }

    /// URLs this resolver was asked about.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl VideoResolver for MockVideoResolver {
    async fn resolve(&self, url: &str) -> FetchResult<VideoDetails> {
        self.calls.write().unwrap().push(url.to_string());

        match &*self.result.read().unwrap() {
            Some(Ok(details)) => Ok(details.clone()),
            Some(Err(error)) => Err(FetchError::Transport(error.to_string().into())),
            None => Err(FetchError::Transport("mock resolver unscripted".into())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A complete HTML page fixture with the given title and body.
pub fn html_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{}</title></head>\n<body>{}</body>\n</html>",
        title, body
    )
}

/// An article fixture with roughly `words` words of body text.
pub fn article_page(title: &str, words: usize) -> String {
    let body = "Lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod tempor. "
        .split_whitespace()
        .cycle()
        .take(words)
        .collect::<Vec<_>>()
        .join(" ");
    html_page(title, &format!("<article><h1>{}</h1><p>{}</p></article>", title, body))
}

/// A minimal valid model response for the given title/tags.
pub fn model_json(title: &str, tags: &[&str]) -> String {
    serde_json::json!({
        "title": title,
        "description": format!("About {}", title),
        "tags": tags,
        "contentQuality": {
            "relevance": 0.9,
            "informativeness": 0.8,
            "credibility": 0.7,
            "overallScore": 0.8
        },
        "mainTopics": [title]
    })
    .to_string()
}
