//! Validation and normalization of model output.
//!
//! Takes the tolerantly-parsed [`RawAnalysis`] and produces the canonical
//! record: scores clamped, tags cleaned and capped per content kind,
//! lengths bounded, page metadata copied through unchanged. The model is
//! never trusted to enforce its own schema limits.

use indexmap::IndexSet;

use crate::config::EnrichmentConfig;
use crate::extract::truncate_chars;
use crate::pipeline::parse::{RawAnalysis, RawQuality};
use crate::types::analysis::{
    AiAnalysis, AnalysisMetadata, ContentQuality, Recommendations,
};
use crate::types::page::PageContent;

/// A missing score defaults to neutral rather than zero, so an absent
/// judgment does not read as a negative one. Zero is reserved for the
/// fallback generator.
const NEUTRAL_SCORE: f32 = 0.5;

fn score(value: Option<f32>) -> f32 {
    value.unwrap_or(NEUTRAL_SCORE).clamp(0.0, 1.0)
}

/// Lowercase, trim, drop empties, dedup preserving first-seen order,
/// cap at `budget`.
pub fn clean_tags<I>(tags: I, budget: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: IndexSet<String> = IndexSet::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() {
            seen.insert(tag);
        }
    }
    seen.into_iter().take(budget).collect()
}

/// Normalize a parsed model response into the canonical analysis record.
///
/// `page` supplies the fallback title/description, the per-kind policy and
/// the metadata to pass through; `attempts` is stamped by the caller.
pub fn normalize_analysis(
    raw: RawAnalysis,
    page: &PageContent,
    attempts: u32,
    config: &EnrichmentConfig,
) -> AiAnalysis {
    let quality = clamp_quality(raw.content_quality);

    let recommendations = raw.recommendations.unwrap_or_default();

    let merged_tags = raw
        .tags
        .unwrap_or_default()
        .into_iter()
        .chain(recommendations.suggested_tags.iter().cloned());
    let tags = clean_tags(merged_tags, page.kind.tag_budget());

    let title_source = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| page.title.clone());
    let description_source = raw
        .description
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| page.description.clone());

    let title = truncate_chars(title_source.trim(), config.max_title_chars);
    let description = truncate_chars(description_source.trim(), page.kind.description_cap());

    let main_topics: Vec<String> = raw
        .main_topics
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .take(config.max_topics)
        .collect();

    let recommendations = {
        let cleaned = Recommendations {
            improved_title: recommendations.improved_title,
            improved_description: recommendations.improved_description,
            suggested_tags: clean_tags(
                recommendations.suggested_tags,
                page.kind.tag_budget(),
            ),
        };
        let empty = cleaned.improved_title.is_none()
            && cleaned.improved_description.is_none()
            && cleaned.suggested_tags.is_empty();
        (!empty).then_some(cleaned)
    };

    AiAnalysis {
        title,
        description,
        tags,
        content_quality: quality,
        main_topics,
        recommendations,
        metadata: AnalysisMetadata::from_page(page.metadata.clone(), attempts),
    }
}

fn clamp_quality(raw: RawQuality) -> ContentQuality {
    ContentQuality {
        relevance: score(raw.relevance),
        informativeness: score(raw.informativeness),
        credibility: score(raw.credibility),
        overall_score: score(raw.overall_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::parse::RawRecommendations;
    use crate::types::page::{ContentKind, PageMetadata};

    fn page(kind: ContentKind) -> PageContent {
        let mut page = PageContent::new("https://example.com/x", "body")
            .with_title("Page Title")
            .with_description("Page description")
            .with_kind(kind);
        page.metadata = PageMetadata {
            author: Some("Jane".into()),
            publish_date: Some("2024-01-01".into()),
            ..Default::default()
        };
        page
    }

    fn raw() -> RawAnalysis {
        RawAnalysis {
            title: Some("Model Title".into()),
            description: Some("Model description".into()),
            tags: Some(vec!["Rust".into(), "rust".into(), " Web ".into(), "".into()]),
            content_quality: RawQuality {
                relevance: Some(1.4),
                informativeness: Some(-0.3),
                credibility: None,
                overall_score: Some(0.8),
            },
            main_topics: vec!["Systems".into(), "".into()],
            recommendations: None,
        }
    }

    #[test]
    fn clamps_and_defaults_scores() {
        let analysis = normalize_analysis(raw(), &page(ContentKind::Webpage), 1, &EnrichmentConfig::default());
        assert_eq!(analysis.content_quality.relevance, 1.0);
        assert_eq!(analysis.content_quality.informativeness, 0.0);
        assert_eq!(analysis.content_quality.credibility, NEUTRAL_SCORE);
        assert_eq!(analysis.content_quality.overall_score, 0.8);
        assert!(analysis.is_well_formed());
    }

    #[test]
    fn tag_hygiene() {
        let analysis = normalize_analysis(raw(), &page(ContentKind::Webpage), 1, &EnrichmentConfig::default());
        assert_eq!(analysis.tags, vec!["rust", "web"]);
    }

    #[test]
    fn merges_suggested_tags_within_budget() {
        let mut input = raw();
        input.recommendations = Some(RawRecommendations {
            improved_title: None,
            improved_description: None,
            suggested_tags: vec!["async".into(), "tokio".into(), "rust".into(), "extra".into(), "more".into()],
        });
        let analysis = normalize_analysis(input, &page(ContentKind::Webpage), 1, &EnrichmentConfig::default());
        // Webpage budget is 5; dedup against the primary tags happens first.
        assert_eq!(analysis.tags.len(), 5);
        assert_eq!(&analysis.tags[..2], &["rust", "web"]);
        assert!(analysis.tags.contains(&"async".to_string()));
    }

    #[test]
    fn video_budget_is_larger() {
        let mut input = raw();
        input.tags = Some((0..20).map(|i| format!("tag{}", i)).collect());
        let analysis = normalize_analysis(input, &page(ContentKind::Video), 1, &EnrichmentConfig::default());
        assert_eq!(analysis.tags.len(), 15);
    }

    #[test]
    fn truncates_title_and_description() {
        let mut input = raw();
        input.title = Some("x".repeat(200));
        input.description = Some("y".repeat(1000));
        let analysis = normalize_analysis(input, &page(ContentKind::Webpage), 1, &EnrichmentConfig::default());
        assert_eq!(analysis.title.chars().count(), 60);
        assert_eq!(analysis.description.chars().count(), 160);

        let mut input = raw();
        input.description = Some("y".repeat(1000));
        let analysis = normalize_analysis(input, &page(ContentKind::Article), 1, &EnrichmentConfig::default());
        assert_eq!(analysis.description.chars().count(), 300);
    }

    #[test]
    fn falls_back_to_page_title_when_model_blank() {
        let mut input = raw();
        input.title = Some("   ".into());
        let analysis = normalize_analysis(input, &page(ContentKind::Webpage), 1, &EnrichmentConfig::default());
        assert_eq!(analysis.title, "Page Title");
    }

    #[test]
    fn metadata_passes_through_with_attempts() {
        let analysis = normalize_analysis(raw(), &page(ContentKind::Webpage), 3, &EnrichmentConfig::default());
        assert_eq!(analysis.metadata.author.as_deref(), Some("Jane"));
        assert_eq!(analysis.metadata.publish_date.as_deref(), Some("2024-01-01"));
        assert_eq!(analysis.metadata.analysis_attempts, 3);
        assert!(analysis.metadata.error.is_none());
    }
}
