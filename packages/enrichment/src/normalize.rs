//! URL normalization.
//!
//! Canonicalizes a raw user-supplied string into a well-formed absolute URL
//! used as the key for attempt tracking and as the fetch target. Pure, no
//! side effects.

use crate::error::{FetchError, FetchResult};

/// Normalize a raw string into a canonical absolute URL.
///
/// - Trims whitespace; empty input is an error
/// - Injects `https://` when no scheme is present
/// - Upgrades `http://` to `https://`
/// - Parses strictly; malformed input is an error
/// - Strips a single trailing slash so `https://a.com/` and `https://a.com`
///   key identically
pub fn normalize_url(raw: &str) -> FetchResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidUrl { url: raw.into() });
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let with_scheme = match with_scheme.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => with_scheme,
    };

    let parsed = url::Url::parse(&with_scheme).map_err(|_| FetchError::InvalidUrl {
        url: trimmed.into(),
    })?;

    // The url crate accepts some strings that are clearly not web URLs
    // ("https://not a url" parses with host "not%20a%20url" rejected, but
    // schemes like "data:" would slip through the contains check above).
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(FetchError::InvalidUrl {
            url: trimmed.into(),
        });
    }

    // Only a path-final slash is stripped; a slash ending a query or
    // fragment is part of that component.
    let mut canonical = parsed.to_string();
    if canonical.ends_with('/') && parsed.query().is_none() && parsed.fragment().is_none() {
        canonical.pop();
    }

    Ok(canonical)
}
