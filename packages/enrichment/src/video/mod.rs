//! Video-platform handling.
//!
//! Known video hosts bypass generic HTML extraction: their watch pages are
//! JS shells that scrape poorly and trip bot detection constantly. Instead
//! the pipeline asks a [`VideoResolver`](crate::traits::VideoResolver) for
//! platform metadata and builds page content from that, degrading to
//! social-preview tags when resolution fails.

pub mod oembed;

pub use oembed::OEmbedResolver;

use crate::config::EnrichmentConfig;
use crate::extract::{collapse_whitespace, truncate_chars};
use crate::types::page::{ContentKind, PageContent, PageMetadata, VideoDetails};

/// Hostnames routed through the video path.
const VIDEO_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "youtu.be",
    "vimeo.com",
    "player.vimeo.com",
    "dailymotion.com",
    "www.dailymotion.com",
    "twitch.tv",
    "www.twitch.tv",
];

/// Whether a URL points at a known video platform.
pub fn is_video_host(url: &str) -> bool {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .is_some_and(|host| VIDEO_HOSTS.contains(&host.as_str()))
}

/// Build page content from resolved video details.
///
/// The transcript is folded into the body so the analysis can draw
/// vocabulary from what is actually said, not just the blurb.
pub fn page_from_details(
    url: &str,
    details: VideoDetails,
    config: &EnrichmentConfig,
) -> PageContent {
    let title = details.title.unwrap_or_default();
    let description = details.description.unwrap_or_default();

    let mut parts = vec![title.clone()];
    if let Some(author) = &details.author {
        parts.push(format!("by {}", author));
    }
    parts.push(description.clone());
    if let Some(transcript) = &details.transcript {
        parts.push(transcript.clone());
    }

    let combined = collapse_whitespace(&parts.join(" "));
    let content = truncate_chars(&combined, config.max_content_chars);

    PageContent {
        url: url.to_string(),
        title,
        description,
        content,
        kind: ContentKind::Video,
        metadata: PageMetadata {
            author: details.author,
            publish_date: details.publish_date,
            last_modified: None,
            main_image: details.thumbnail,
            word_count: None,
        },
        fetched_at: chrono::Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_video_hosts() {
        assert!(is_video_host("https://www.youtube.com/watch?v=abc"));
        assert!(is_video_host("https://youtu.be/abc"));
        assert!(is_video_host("https://vimeo.com/12345"));
        assert!(!is_video_host("https://example.com/watch?v=abc"));
        assert!(!is_video_host("https://notyoutube.com/video"));
        assert!(!is_video_host("not a url"));
    }

    #[test]
    fn builds_page_from_details() {
        let details = VideoDetails {
            title: Some("Async Rust Deep Dive".into()),
            author: Some("Jane Streamer".into()),
            publish_date: Some("2024-03-01".into()),
            description: Some("A talk about executors.".into()),
            transcript: Some("today we will look at wakers and polling".into()),
            thumbnail: Some("https://img.example.com/t.jpg".into()),
        };
        let page = page_from_details(
            "https://www.youtube.com/watch?v=abc",
            details,
            &EnrichmentConfig::default(),
        );

        assert_eq!(page.kind, ContentKind::Video);
        assert_eq!(page.title, "Async Rust Deep Dive");
        assert!(page.content.contains("wakers and polling"));
        assert!(page.content.contains("Jane Streamer"));
        assert_eq!(page.metadata.author.as_deref(), Some("Jane Streamer"));
        assert_eq!(
            page.metadata.main_image.as_deref(),
            Some("https://img.example.com/t.jpg")
        );
    }
}
