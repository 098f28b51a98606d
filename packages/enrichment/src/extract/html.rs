//! Low-level HTML document operations.
//!
//! Parsing, boilerplate removal and text cleanup for the extractor. Body
//! text comes out as Markdown via `htmd` so structure (headings, lists)
//! survives into the analysis prompt.

use scraper::{Html, Selector};

/// Likely main-content containers, tried in order.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    "#content",
    "#main",
    ".content",
    ".main",
    ".post-content",
    ".entry-content",
    ".article-body",
];

/// Elements that never carry page content.
const BOILERPLATE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    "iframe",
    "nav",
    "header",
    "footer",
    "aside",
    ".nav",
    ".navbar",
    ".header",
    ".footer",
    ".sidebar",
    ".menu",
    ".advertisement",
    ".ads",
    ".cookie-banner",
    ".cookie-consent",
    ".gdpr-banner",
    "#nav",
    "#header",
    "#footer",
    "#sidebar",
    "#cookie-banner",
];

/// Extract the `<title>` text.
pub fn document_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Extract the first heading's text.
pub fn first_heading(document: &Html) -> Option<String> {
    for tag in ["h1", "h2"] {
        if let Ok(selector) = Selector::parse(tag) {
            if let Some(heading) = document
                .select(&selector)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|t| !t.is_empty())
            {
                return Some(heading);
            }
        }
    }
    None
}

/// Extract main content HTML from the first matching content container,
/// falling back to the body with boilerplate stripped.
pub fn main_content_html(document: &Html) -> String {
    for selector_str in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(main) = document.select(&selector).next() {
                return main.html();
            }
        }
    }

    if let Ok(body_selector) = Selector::parse("body") {
        if let Some(body) = document.select(&body_selector).next() {
            return remove_boilerplate(&body.html());
        }
    }

    document.html()
}

/// Remove boilerplate elements from an HTML string.
///
/// `scraper` documents are read-only, so removal works by deleting each
/// matched element's serialized form from the string.
pub fn remove_boilerplate(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut result = html.to_string();

    for selector_str in BOILERPLATE_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let element_html = element.html();
                result = result.replace(&element_html, "");
            }
        }
    }

    result
}

/// Convert HTML to Markdown text.
pub fn html_to_markdown(html: &str) -> String {
    htmd::convert(html).unwrap_or_else(|_| {
        // Fallback: strip tags and return plain text
        let document = Html::parse_document(html);
        document.root_element().text().collect::<String>()
    })
}

/// Full rendered text of the document with scripts/styles excluded.
///
/// Used for bot-detection scanning, where hidden challenge text matters
/// even if it sits outside the main content area.
pub fn rendered_text(document: &Html) -> String {
    let without_code = remove_boilerplate(&document.html());
    let stripped = Html::parse_document(&without_code);
    collapse_whitespace(&stripped.root_element().text().collect::<String>())
}

/// Read the `content` attribute of the first element matching `selector`.
pub fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collapse runs of whitespace into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    let pattern = regex::Regex::new(r"\s+").expect("static regex");
    pattern.replace_all(text.trim(), " ").to_string()
}

/// Truncate to at most `max` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}
