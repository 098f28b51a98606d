//! Bot-detection page recognition.
//!
//! CAPTCHA and verification interstitials come back with 200 OK and a
//! perfectly valid document, so they have to be caught by their text.
//! Matching fails the extraction fast instead of returning degraded
//! content; the pipeline then falls back to social-preview metadata rather
//! than analyzing a challenge page as if it were real content.

/// Phrases that mark a page as a bot-detection challenge.
///
/// Matched case-insensitively against the rendered page text. Kept to
/// phrases unlikely to appear in genuine prose.
const BOT_PHRASES: &[&str] = &[
    "verify you are human",
    "verify that you are human",
    "please verify you are human",
    "checking your browser before accessing",
    "enable javascript and cookies to continue",
    "complete the security check",
    "are you a robot",
    "unusual traffic from your computer network",
    "cloudflare ray id",
    "attention required! | cloudflare",
    "access to this page has been denied",
    "press & hold to confirm you are a human",
];

/// Scan rendered text for a bot-detection phrase.
///
/// Returns the matched phrase so the error can name it.
pub fn detect(rendered_text: &str) -> Option<&'static str> {
    let haystack = rendered_text.to_lowercase();
    BOT_PHRASES.iter().copied().find(|p| haystack.contains(p))
}
