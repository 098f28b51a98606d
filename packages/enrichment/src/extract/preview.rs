//! Social-preview metadata extraction.
//!
//! Open Graph and Twitter Card tags are often intact on pages whose body
//! is useless to a scraper (bot challenges, JS-only shells, video player
//! pages), so they serve as the alternate metadata source for the degraded
//! paths.

use scraper::Html;

use crate::extract::html::meta_content;
use crate::types::page::{ContentKind, PageContent, PageMetadata};
use crate::video;

/// Preview metadata from og:/twitter: tags.
#[derive(Debug, Clone, Default)]
pub struct SocialPreview {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub site_name: Option<String>,
    /// og:type value, e.g. "article" or "video.other"
    pub kind_hint: Option<String>,
}

impl SocialPreview {
    /// Whether the preview carries enough to stand in for extraction.
    pub fn is_usable(&self) -> bool {
        self.title.is_some()
    }
}

/// Pull social-preview tags out of a parsed document.
pub fn social_preview(document: &Html) -> SocialPreview {
    SocialPreview {
        title: meta_content(document, r#"meta[property="og:title"]"#)
            .or_else(|| meta_content(document, r#"meta[name="twitter:title"]"#)),
        description: meta_content(document, r#"meta[property="og:description"]"#)
            .or_else(|| meta_content(document, r#"meta[name="twitter:description"]"#))
            .or_else(|| meta_content(document, r#"meta[name="description"]"#)),
        image: meta_content(document, r#"meta[property="og:image"]"#)
            .or_else(|| meta_content(document, r#"meta[name="twitter:image"]"#)),
        site_name: meta_content(document, r#"meta[property="og:site_name"]"#),
        kind_hint: meta_content(document, r#"meta[property="og:type"]"#),
    }
}

/// Build degraded page content from preview tags alone.
///
/// Used when real extraction is impossible (bot challenge, failed video
/// resolution). Returns `None` when not even a preview title survives -
/// at that point the invocation has nothing and falls back entirely.
pub fn preview_page(html: &str, url: &str) -> Option<PageContent> {
    let document = Html::parse_document(html);
    let preview = social_preview(&document);

    if !preview.is_usable() {
        return None;
    }

    let title = preview.title.unwrap_or_default();
    let description = preview.description.unwrap_or_default();

    let kind = if video::is_video_host(url)
        || preview
            .kind_hint
            .as_deref()
            .is_some_and(|k| k.starts_with("video"))
    {
        ContentKind::Video
    } else if preview.kind_hint.as_deref() == Some("article") {
        ContentKind::Article
    } else {
        ContentKind::Webpage
    };

    let content = format!("{} {}", title, description).trim().to_string();

    Some(PageContent {
        url: url.to_string(),
        title,
        description,
        content,
        kind,
        metadata: PageMetadata {
            main_image: preview.image,
            ..Default::default()
        },
        fetched_at: chrono::Utc::now(),
    })
}
