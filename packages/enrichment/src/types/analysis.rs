//! The final analysis record - the contract handed to the bookmark store.
//!
//! Serializes camelCase because the downstream consumer treats these
//! records as JSON documents.

use serde::{Deserialize, Serialize};

use crate::types::page::PageMetadata;

/// Quality sub-scores, each clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQuality {
    pub relevance: f32,
    pub informativeness: f32,
    pub credibility: f32,
    pub overall_score: f32,
}

impl ContentQuality {
    /// All scores zero - the fallback sentinel.
    ///
    /// A fallback record must be visibly distinguishable from a genuine
    /// low-confidence analysis, which uses the neutral default instead.
    pub fn zero() -> Self {
        Self {
            relevance: 0.0,
            informativeness: 0.0,
            credibility: 0.0,
            overall_score: 0.0,
        }
    }

    /// Neutral mid scores - the default when the model omits a value.
    pub fn neutral() -> Self {
        Self {
            relevance: 0.5,
            informativeness: 0.5,
            credibility: 0.5,
            overall_score: 0.5,
        }
    }

    /// Clamp every score into [0, 1].
    pub fn clamped(self) -> Self {
        Self {
            relevance: self.relevance.clamp(0.0, 1.0),
            informativeness: self.informativeness.clamp(0.0, 1.0),
            credibility: self.credibility.clamp(0.0, 1.0),
            overall_score: self.overall_score.clamp(0.0, 1.0),
        }
    }

    /// Whether every score is inside [0, 1].
    pub fn in_bounds(&self) -> bool {
        [
            self.relevance,
            self.informativeness,
            self.credibility,
            self.overall_score,
        ]
        .iter()
        .all(|s| (0.0..=1.0).contains(s))
    }
}

/// Alternate title/description/tags suggested by the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improved_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub improved_description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_tags: Vec<String>,
}

/// Metadata carried on the final record.
///
/// Page-derived fields pass through from extraction unchanged; the model is
/// never asked to re-derive them. `analysis_attempts` is present on every
/// record; `error` only on fallback paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,

    /// Count of enrichment attempts for this URL, always >= 1.
    pub analysis_attempts: u32,

    /// Failure description, set only when the record is a fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisMetadata {
    /// Build from page metadata plus the attempt count.
    pub fn from_page(page: PageMetadata, analysis_attempts: u32) -> Self {
        Self {
            author: page.author,
            publish_date: page.publish_date,
            last_modified: page.last_modified,
            main_image: page.main_image,
            word_count: page.word_count,
            analysis_attempts,
            error: None,
        }
    }
}

/// Structured content analysis for a single URL.
///
/// This is the pipeline's only output. Invariants (enforced by the
/// validator and the fallback generator, checked by `is_well_formed`):
/// - every quality score in [0, 1]
/// - no duplicate or empty tags
/// - title and description within their caps
/// - `metadata.analysis_attempts >= 1`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub content_quality: ContentQuality,
    pub main_topics: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Recommendations>,

    pub metadata: AnalysisMetadata,
}

impl AiAnalysis {
    /// Whether this record satisfies the output invariants.
    ///
    /// Exposed mainly for tests and debug assertions at the boundary.
    pub fn is_well_formed(&self) -> bool {
        let tags_clean = {
            let mut seen = std::collections::HashSet::new();
            self.tags
                .iter()
                .all(|t| !t.trim().is_empty() && seen.insert(t.to_lowercase()))
        };

        self.content_quality.in_bounds()
            && tags_clean
            && self.title.chars().count() <= 60
            && self.metadata.analysis_attempts >= 1
    }

    /// Whether this record was produced by the fallback generator.
    pub fn is_fallback(&self) -> bool {
        self.metadata.error.is_some()
    }
}
