//! Prompts for the structured-generation model.
//!
//! One template per content family: generic web pages and video pages.
//! Both instruct the model to return only a JSON object with a fixed
//! schema; the validator repairs whatever actually comes back.

use sha2::{Digest, Sha256};

use crate::types::page::{ContentKind, PageContent};

/// System instruction shared by both templates.
pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are a bookmark enrichment assistant. \
You analyze page content and return ONLY a single JSON object, no prose, \
no markdown fences. Be factual; never invent details absent from the content.";

/// Prompt for generic web content (webpage/article/product).
pub const WEB_ANALYSIS_PROMPT: &str = r#"Analyze this {kind} for a bookmark record.

URL: {url}
Title: {title}
Content:
{content}

Output JSON with exactly this shape:
{
    "title": "concise title, max 60 chars",
    "description": "summary of what this page is about",
    "tags": ["3-5 lowercase topical tags"],
    "contentQuality": {
        "relevance": 0.0 to 1.0,
        "informativeness": 0.0 to 1.0,
        "credibility": 0.0 to 1.0,
        "overallScore": 0.0 to 1.0
    },
    "mainTopics": ["2-5 main topics"],
    "recommendations": {
        "improvedTitle": "optional better title",
        "improvedDescription": "optional better description",
        "suggestedTags": ["optional additional tags"]
    }
}"#;

/// Prompt for video content - richer tag budget, transcript-aware.
pub const VIDEO_ANALYSIS_PROMPT: &str = r#"Analyze this video page for a bookmark record.

URL: {url}
Title: {title}
Creator and description/transcript:
{content}

The content may include a transcript; draw tags and topics from what is
actually said, not only the title.

Output JSON with exactly this shape:
{
    "title": "concise title, max 60 chars",
    "description": "what this video covers and who it is for",
    "tags": ["5-15 lowercase tags covering spoken topics"],
    "contentQuality": {
        "relevance": 0.0 to 1.0,
        "informativeness": 0.0 to 1.0,
        "credibility": 0.0 to 1.0,
        "overallScore": 0.0 to 1.0
    },
    "mainTopics": ["2-5 main topics"],
    "recommendations": {
        "improvedTitle": "optional better title",
        "improvedDescription": "optional better description",
        "suggestedTags": ["optional additional tags"]
    }
}"#;

/// Select and fill the template for a page, truncating content to the
/// prompt budget.
pub fn format_analysis_prompt(page: &PageContent, max_content_chars: usize) -> String {
    let content: String = page.content.chars().take(max_content_chars).collect();

    let template = match page.kind {
        ContentKind::Video => VIDEO_ANALYSIS_PROMPT,
        _ => WEB_ANALYSIS_PROMPT,
    };

    let kind_label = match page.kind {
        ContentKind::Webpage => "web page",
        ContentKind::Article => "article",
        ContentKind::Product => "product page",
        ContentKind::Video => "video page",
    };

    template
        .replace("{kind}", kind_label)
        .replace("{url}", &page.url)
        .replace("{title}", &page.title)
        .replace("{content}", &content)
}

/// Hash of the active prompt templates, for correlating debug artifacts
/// across prompt revisions.
pub fn analysis_prompt_hash() -> String {
    let mut hasher = Sha256::new();
    hasher.update(ANALYSIS_SYSTEM_PROMPT.as_bytes());
    hasher.update(WEB_ANALYSIS_PROMPT.as_bytes());
    hasher.update(VIDEO_ANALYSIS_PROMPT.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_template_by_kind() {
        let web = PageContent::new("https://example.com", "body").with_title("T");
        let prompt = format_analysis_prompt(&web, 1000);
        assert!(prompt.contains("Analyze this web page"));
        assert!(prompt.contains("https://example.com"));

        let video = PageContent::new("https://youtube.com/watch?v=x", "spoken words")
            .with_kind(crate::types::page::ContentKind::Video);
        let prompt = format_analysis_prompt(&video, 1000);
        assert!(prompt.contains("transcript"));
        assert!(prompt.contains("5-15 lowercase tags"));
    }

    #[test]
    fn truncates_content_to_budget() {
        let page = PageContent::new("https://example.com", "x".repeat(10_000));
        let prompt = format_analysis_prompt(&page, 100);
        // Content plus template overhead stays far under the raw length.
        assert!(prompt.len() < 2_000);
    }

    #[test]
    fn prompt_hash_is_stable() {
        assert_eq!(analysis_prompt_hash(), analysis_prompt_hash());
        assert_eq!(analysis_prompt_hash().len(), 64);
    }
}
