//! oEmbed-backed video resolver.
//!
//! oEmbed endpoints return JSON metadata without bot-detection friction,
//! which makes them the cheapest platform-specific path for title, creator
//! and thumbnail. Fields the protocol does not carry (description,
//! transcript) stay empty; richer providers can implement
//! [`VideoResolver`](crate::traits::VideoResolver) themselves.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::traits::video::VideoResolver;
use crate::types::page::VideoDetails;

/// Video resolver using public oEmbed endpoints.
pub struct OEmbedResolver {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
    author_name: Option<String>,
    thumbnail_url: Option<String>,
}

impl OEmbedResolver {
    /// Create a resolver with a 10s request timeout.
    pub fn new() -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| FetchError::Transport(Box::new(e)))?;
        Ok(Self { client })
    }

    /// oEmbed endpoint for a video URL, if the platform has one.
    fn endpoint(url: &str) -> Option<String> {
        let parsed = url::Url::parse(url).ok()?;
        let host = parsed.host_str()?.to_lowercase();
        let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();

        if host.ends_with("youtube.com") || host == "youtu.be" {
            Some(format!(
                "https://www.youtube.com/oembed?format=json&url={}",
                encoded
            ))
        } else if host.ends_with("vimeo.com") {
            Some(format!("https://vimeo.com/api/oembed.json?url={}", encoded))
        } else if host.ends_with("dailymotion.com") {
            Some(format!(
                "https://www.dailymotion.com/services/oembed?format=json&url={}",
                encoded
            ))
        } else {
            None
        }
    }
}

#[async_trait]
impl VideoResolver for OEmbedResolver {
    async fn resolve(&self, url: &str) -> FetchResult<VideoDetails> {
        let endpoint = Self::endpoint(url).ok_or_else(|| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;

        debug!(url = %url, endpoint = %endpoint, "resolving video via oEmbed");

        let response = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| FetchError::Transport(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let oembed: OEmbedResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Transport(Box::new(e)))?;

        Ok(VideoDetails {
            title: oembed.title,
            author: oembed.author_name,
            publish_date: None,
            description: None,
            transcript: None,
            thumbnail: oembed.thumbnail_url,
        })
    }

    fn name(&self) -> &str {
        "oembed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_per_platform() {
        let yt = OEmbedResolver::endpoint("https://www.youtube.com/watch?v=abc").unwrap();
        assert!(yt.starts_with("https://www.youtube.com/oembed"));
        assert!(yt.contains("watch%3Fv%3Dabc"));

        let vimeo = OEmbedResolver::endpoint("https://vimeo.com/12345").unwrap();
        assert!(vimeo.starts_with("https://vimeo.com/api/oembed.json"));

        assert!(OEmbedResolver::endpoint("https://example.com/clip").is_none());
    }
}
