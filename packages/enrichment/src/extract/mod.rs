//! Content classification and extraction.
//!
//! Turns a raw HTML payload into a typed, cleaned [`PageContent`] record:
//! guards against non-page payloads, fails fast on bot-detection
//! interstitials, strips boilerplate, resolves title/description through
//! the social-preview → document → heading chain, classifies the content
//! kind and pulls best-effort metadata from standard meta tags.

pub mod bot;
pub mod html;
pub mod preview;

pub use html::{collapse_whitespace, truncate_chars};
pub use preview::{preview_page, social_preview, SocialPreview};

use scraper::{Html, Selector};
use tracing::debug;

use crate::config::EnrichmentConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::types::page::{ContentKind, PageContent, PageMetadata};
use crate::video;

/// Sentinel title when nothing better can be resolved.
const UNTITLED: &str = "Untitled Page";

/// Extract cleaned, classified page content from an HTML payload.
pub fn extract_page(
    raw_html: &str,
    url: &str,
    config: &EnrichmentConfig,
) -> ExtractResult<PageContent> {
    if raw_html.len() < config.min_html_bytes {
        return Err(ExtractError::EmptyOrShort {
            bytes: raw_html.len(),
        });
    }

    // A JSON body or error page served as text/html has no document
    // markers; reject it before wasting a parse.
    let head = raw_html
        .get(..raw_html.len().min(2048))
        .unwrap_or(raw_html)
        .to_lowercase();
    if !head.contains("<!doctype") && !head.contains("<html") && !head.contains("<body") {
        return Err(ExtractError::InvalidHtml);
    }

    let document = Html::parse_document(raw_html);

    let text = html::rendered_text(&document);
    if let Some(phrase) = bot::detect(&text) {
        debug!(url = %url, phrase = %phrase, "bot-detection page matched");
        return Err(ExtractError::BotDetected {
            phrase: phrase.to_string(),
        });
    }

    let preview = preview::social_preview(&document);

    let title = preview
        .title
        .clone()
        .or_else(|| html::document_title(&document))
        .or_else(|| html::first_heading(&document))
        .unwrap_or_else(|| UNTITLED.to_string());

    let description = preview.description.clone().unwrap_or_default();

    let body_markdown = html::html_to_markdown(&html::main_content_html(&document));
    let body_text = collapse_whitespace(&body_markdown);
    if body_text.is_empty() {
        return Err(ExtractError::NoContent { url: url.into() });
    }

    let kind = classify(&document, &preview, &text, url);
    let metadata = page_metadata(&document, &preview, &body_text);

    let combined = collapse_whitespace(&format!("{} {} {}", title, description, body_text));
    let content = truncate_chars(&combined, config.max_content_chars);

    debug!(
        url = %url,
        kind = ?kind,
        content_chars = content.len(),
        "page extracted"
    );

    Ok(PageContent {
        url: url.to_string(),
        title,
        description,
        content,
        kind,
        metadata,
        fetched_at: chrono::Utc::now(),
    })
}

/// Assign a content kind, first match wins:
/// product markup → article markup → video host → webpage.
fn classify(
    document: &Html,
    preview: &SocialPreview,
    rendered_text: &str,
    url: &str,
) -> ContentKind {
    if has_product_markup(document, rendered_text) {
        return ContentKind::Product;
    }

    let og_type = preview.kind_hint.as_deref().unwrap_or("");
    if og_type == "article"
        || has_selector(document, r#"[itemtype*="schema.org/Article"]"#)
        || has_selector(document, "article")
    {
        return ContentKind::Article;
    }

    if video::is_video_host(url) || og_type.starts_with("video") {
        return ContentKind::Video;
    }

    ContentKind::Webpage
}

fn has_product_markup(document: &Html, rendered_text: &str) -> bool {
    if has_selector(document, r#"[itemtype*="schema.org/Product"]"#)
        || has_selector(document, r#"meta[property="og:type"][content="product"]"#)
    {
        return true;
    }

    // Price next to a purchase call-to-action is a strong product signal.
    let price = regex::Regex::new(r"[$€£]\s?\d+(?:[.,]\d{2})?").expect("static regex");
    let lower = rendered_text.to_lowercase();
    price.is_match(rendered_text) && (lower.contains("add to cart") || lower.contains("buy now"))
}

fn has_selector(document: &Html, selector: &str) -> bool {
    Selector::parse(selector)
        .map(|s| document.select(&s).next().is_some())
        .unwrap_or(false)
}

/// Best-effort metadata from standard meta tags.
fn page_metadata(document: &Html, preview: &SocialPreview, body_text: &str) -> PageMetadata {
    PageMetadata {
        author: html::meta_content(document, r#"meta[name="author"]"#)
            .or_else(|| html::meta_content(document, r#"meta[property="article:author"]"#)),
        publish_date: html::meta_content(document, r#"meta[property="article:published_time"]"#),
        last_modified: html::meta_content(document, r#"meta[property="article:modified_time"]"#),
        main_image: preview.image.clone(),
        word_count: Some(body_text.split_whitespace().count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EnrichmentConfig {
        EnrichmentConfig::default().with_min_html_bytes(20)
    }

    fn wrap(body: &str) -> String {
        format!("<!DOCTYPE html><html><head><title>Test Page</title></head><body>{}</body></html>", body)
    }

    #[test]
    fn rejects_short_payloads() {
        let err = extract_page("<html>", "https://example.com", &EnrichmentConfig::default())
            .unwrap_err();
        assert!(matches!(err, ExtractError::EmptyOrShort { .. }));
    }

    #[test]
    fn rejects_non_html_payloads() {
        let json = r#"{"error": "not found", "status": 404, "padding": "aaaaaaaaaaaaaaaaaaaa"}"#;
        let err = extract_page(json, "https://example.com", &config()).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidHtml));
    }

    #[test]
    fn fails_fast_on_captcha_pages() {
        let html = wrap("<p>Please verify you are human before continuing.</p>");
        let err = extract_page(&html, "https://example.com", &config()).unwrap_err();
        assert!(matches!(err, ExtractError::BotDetected { .. }));
    }

    #[test]
    fn extracts_article() {
        let html = format!(
            "<!DOCTYPE html><html><head><title>Doc Title</title>\
             <meta property=\"og:title\" content=\"OG Title\" />\
             <meta property=\"og:description\" content=\"A description.\" />\
             <meta name=\"author\" content=\"Jane Doe\" />\
             <meta property=\"article:published_time\" content=\"2024-05-01T10:00:00Z\" />\
             </head><body><nav>skip me</nav><article><h1>Heading</h1>{}</article></body></html>",
            "<p>Body sentence with enough words to count.</p>".repeat(5)
        );
        let page = extract_page(&html, "https://example.com/post", &config()).unwrap();

        assert_eq!(page.title, "OG Title", "social preview wins");
        assert_eq!(page.description, "A description.");
        assert_eq!(page.kind, ContentKind::Article);
        assert_eq!(page.metadata.author.as_deref(), Some("Jane Doe"));
        assert_eq!(
            page.metadata.publish_date.as_deref(),
            Some("2024-05-01T10:00:00Z")
        );
        assert!(page.content.starts_with("OG Title"));
        assert!(!page.content.contains("skip me"));
        assert!(page.metadata.word_count.unwrap() > 10);
    }

    #[test]
    fn title_falls_back_through_the_chain() {
        let html = wrap("<h1>Only A Heading</h1><p>Some body text for the page.</p>");
        let page = extract_page(&html, "https://example.com", &config()).unwrap();
        // Document title beats the heading.
        assert_eq!(page.title, "Test Page");

        let no_title = format!(
            "<!DOCTYPE html><html><head></head><body><h1>Only A Heading</h1>{}</body></html>",
            "<p>padding text</p>".repeat(3)
        );
        let page = extract_page(&no_title, "https://example.com", &config()).unwrap();
        assert_eq!(page.title, "Only A Heading");
    }

    #[test]
    fn untitled_sentinel_when_nothing_resolves() {
        let html = "<!DOCTYPE html><html><head></head><body><p>Paragraphs only, no headings anywhere.</p></body></html>";
        let page = extract_page(html, "https://example.com", &config()).unwrap();
        assert_eq!(page.title, UNTITLED);
    }

    #[test]
    fn classifies_product_pages() {
        let html = wrap("<div><span>$19.99</span><button>Add to cart</button><p>A fine widget for all your widget needs.</p></div>");
        let page = extract_page(&html, "https://shop.example.com/widget", &config()).unwrap();
        assert_eq!(page.kind, ContentKind::Product);
    }

    #[test]
    fn classifies_video_by_host() {
        let html = wrap("<p>Watch this talk about type systems and why they matter.</p>");
        let page = extract_page(&html, "https://www.youtube.com/watch?v=abc", &config()).unwrap();
        assert_eq!(page.kind, ContentKind::Video);
    }

    #[test]
    fn content_respects_cap() {
        let long_body = "<p>word </p>".repeat(2000);
        let html = wrap(&long_body);
        let cfg = EnrichmentConfig::default()
            .with_min_html_bytes(20)
            .with_max_content_chars(500);
        let page = extract_page(&html, "https://example.com", &cfg).unwrap();
        assert!(page.content.chars().count() <= 500);
    }
}
