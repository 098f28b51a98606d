//! Fallback record generation.
//!
//! When analysis is impossible the pipeline still owes its caller a
//! structurally valid record: the bookmark row must render, and the UI
//! must be able to offer a manual retry. Fallback records are made
//! visibly distinguishable from genuine low-confidence analyses: all
//! scores exactly zero, sentinel tags, and `metadata.error` set.

use crate::error::EnrichError;
use crate::types::analysis::{AiAnalysis, AnalysisMetadata, ContentQuality};

/// Tag present on every fallback record.
pub const TAG_ANALYSIS_FAILED: &str = "analysis-failed";

/// Tag signaling that a retry may succeed.
pub const TAG_RETRY_NEEDED: &str = "retry-needed";

/// Tag for inputs that were never valid URLs.
pub const TAG_INVALID_URL: &str = "invalid-url";

/// Build a well-formed placeholder analysis for a failed invocation.
pub fn fallback_analysis(url: &str, error: &EnrichError, attempts: u32) -> AiAnalysis {
    let (host, path) = host_and_path(url);

    let title = match &host {
        Some(host) if path.is_empty() => format!("Bookmark from {}", host),
        Some(host) => format!("{}: {}", host, path),
        None => "Unanalyzed bookmark".to_string(),
    };
    let title = crate::extract::truncate_chars(&title, 60);

    let description = match &host {
        Some(host) => format!("Automatic content analysis for {} did not complete.", host),
        None => "Automatic content analysis did not complete.".to_string(),
    };

    let mut tags = vec![TAG_ANALYSIS_FAILED.to_string()];
    if error.is_invalid_url() {
        tags.push(TAG_INVALID_URL.to_string());
    } else {
        tags.push(TAG_RETRY_NEEDED.to_string());
    }

    AiAnalysis {
        title,
        description,
        tags,
        content_quality: ContentQuality::zero(),
        main_topics: Vec::new(),
        recommendations: None,
        metadata: AnalysisMetadata {
            analysis_attempts: attempts.max(1),
            error: Some(error.to_string()),
            ..Default::default()
        },
    }
}

/// Human-readable host and trimmed path for placeholder text.
fn host_and_path(url: &str) -> (Option<String>, String) {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().map(|h| h.to_string());
            let path = parsed.path().trim_matches('/').to_string();
            (host, path)
        }
        Err(_) => (None, String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, ModelError};

    #[test]
    fn fallback_is_always_well_formed() {
        let error: EnrichError = FetchError::Timeout {
            url: "https://example.com/a".into(),
        }
        .into();
        let analysis = fallback_analysis("https://example.com/a/b", &error, 2);

        assert!(analysis.is_well_formed());
        assert!(analysis.is_fallback());
        assert_eq!(analysis.content_quality, ContentQuality::zero());
        assert_eq!(analysis.metadata.analysis_attempts, 2);
        assert!(analysis.metadata.error.as_deref().unwrap().contains("timeout"));
    }

    #[test]
    fn derives_title_from_host_and_path() {
        let error: EnrichError = ModelError::EmptyResponse.into();
        let analysis = fallback_analysis("https://example.com/blog/post-1", &error, 1);
        assert_eq!(analysis.title, "example.com: blog/post-1");

        let analysis = fallback_analysis("https://example.com", &error, 1);
        assert_eq!(analysis.title, "Bookmark from example.com");
    }

    #[test]
    fn invalid_url_gets_its_own_tag() {
        let error: EnrichError = FetchError::InvalidUrl {
            url: "not a url".into(),
        }
        .into();
        let analysis = fallback_analysis("not a url", &error, 1);
        assert!(analysis.tags.contains(&TAG_INVALID_URL.to_string()));
        assert!(analysis.tags.contains(&TAG_ANALYSIS_FAILED.to_string()));
        assert!(!analysis.tags.contains(&TAG_RETRY_NEEDED.to_string()));
        assert_eq!(analysis.title, "Unanalyzed bookmark");
    }

    #[test]
    fn attempts_floor_is_one() {
        let error: EnrichError = ModelError::EmptyResponse.into();
        let analysis = fallback_analysis("https://example.com", &error, 0);
        assert_eq!(analysis.metadata.analysis_attempts, 1);
    }
}
