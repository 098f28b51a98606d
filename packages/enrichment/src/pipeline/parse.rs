//! Tolerant parsing of model output.
//!
//! Models asked for "only a JSON object" still wrap it in prose and code
//! fences often enough that strict parsing is a reliability bug. The
//! extractor here scans for the first balanced `{...}` block (string- and
//! escape-aware) and parses that; everything around it is ignored.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Quality sub-scores as the model reports them, all optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuality {
    pub relevance: Option<f32>,
    pub informativeness: Option<f32>,
    pub credibility: Option<f32>,
    pub overall_score: Option<f32>,
}

/// Recommendations as the model reports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecommendations {
    pub improved_title: Option<String>,
    pub improved_description: Option<String>,
    #[serde(default)]
    pub suggested_tags: Vec<String>,
}

/// The model's analysis response before validation.
///
/// Required fields are `Option` so a missing field is a typed
/// `MalformedAnalysis`, not a deserialization panic path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysis {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub content_quality: RawQuality,

    #[serde(default)]
    pub main_topics: Vec<String>,

    pub recommendations: Option<RawRecommendations>,
}

/// Find the first balanced `{...}` block in `text`.
///
/// Braces inside JSON strings (and escaped quotes inside those strings)
/// do not count toward nesting. Returns the block as a slice of `text`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse model output into a `RawAnalysis`.
///
/// Fails with `MalformedAnalysis` when no JSON object can be found, when
/// the object does not deserialize, or when any required field (title,
/// description, tags) is missing. All of these are non-retryable: the
/// model answered, just not with the schema.
pub fn parse_analysis(raw_text: &str) -> ModelResult<RawAnalysis> {
    if raw_text.trim().is_empty() {
        return Err(ModelError::EmptyResponse);
    }

    let json_block = extract_json_object(raw_text).ok_or_else(|| ModelError::MalformedAnalysis {
        reason: "no JSON object in response".into(),
    })?;

    let analysis: RawAnalysis =
        serde_json::from_str(json_block).map_err(|e| ModelError::MalformedAnalysis {
            reason: format!("JSON parse failed: {}", e),
        })?;

    for (field, missing) in [
        ("title", analysis.title.is_none()),
        ("description", analysis.description.is_none()),
        ("tags", analysis.tags.is_none()),
    ] {
        if missing {
            return Err(ModelError::MalformedAnalysis {
                reason: format!("missing required field: {}", field),
            });
        }
    }

    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"title": "Foo", "description": "Bar", "tags": ["a", "b"]}"#;

    #[test]
    fn parses_bare_json() {
        let analysis = parse_analysis(VALID).unwrap();
        assert_eq!(analysis.title.as_deref(), Some("Foo"));
        assert_eq!(analysis.tags.as_deref(), Some(&["a".to_string(), "b".to_string()][..]));
    }

    #[test]
    fn parses_prose_wrapped_json() {
        let wrapped = format!("Here is the analysis:\n```json\n{}\n```\nHope that helps!", VALID);
        let analysis = parse_analysis(&wrapped).unwrap();
        assert_eq!(analysis.title.as_deref(), Some("Foo"));
    }

    #[test]
    fn handles_braces_inside_strings() {
        let tricky = r#"Sure: {"title": "Uses {braces} and \"quotes\"", "description": "d", "tags": []} done"#;
        let analysis = parse_analysis(tricky).unwrap();
        assert_eq!(analysis.title.as_deref(), Some(r#"Uses {braces} and "quotes""#));
    }

    #[test]
    fn handles_nested_objects() {
        let nested = r#"{"title": "T", "description": "D", "tags": [], "contentQuality": {"relevance": 0.9}}"#;
        let analysis = parse_analysis(nested).unwrap();
        assert_eq!(analysis.content_quality.relevance, Some(0.9));
        assert_eq!(analysis.content_quality.credibility, None);
    }

    #[test]
    fn missing_required_fields_are_malformed() {
        let no_tags = r#"{"title": "T", "description": "D"}"#;
        let err = parse_analysis(no_tags).unwrap_err();
        assert!(matches!(err, ModelError::MalformedAnalysis { .. }));

        let err = parse_analysis("I could not analyze this page, sorry.").unwrap_err();
        assert!(matches!(err, ModelError::MalformedAnalysis { .. }));
    }

    #[test]
    fn empty_response_is_its_own_error() {
        assert!(matches!(parse_analysis("  \n "), Err(ModelError::EmptyResponse)));
    }

    #[test]
    fn unterminated_object_is_malformed() {
        let truncated = r#"{"title": "T", "description": "D", "tags": ["#;
        assert!(matches!(
            parse_analysis(truncated),
            Err(ModelError::MalformedAnalysis { .. })
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // The extractor must never panic, whatever the model says.
            #[test]
            fn extractor_total_on_arbitrary_text(text in ".*") {
                let _ = extract_json_object(&text);
            }

            // A well-formed object is always recovered from surrounding prose.
            #[test]
            fn recovers_embedded_object(
                prefix in "[^{}]*",
                suffix in "[^{}]*",
                title in "[a-zA-Z0-9 ]{0,40}",
            ) {
                let json = format!(r#"{{"title": "{}", "description": "d", "tags": []}}"#, title);
                let text = format!("{}{}{}", prefix, json, suffix);
                let block = extract_json_object(&text).expect("object present");
                prop_assert_eq!(block, json.as_str());
                let parsed = parse_analysis(&text).expect("parses");
                prop_assert_eq!(parsed.title.as_deref(), Some(title.as_str()));
            }
        }
    }
}
