//! The enrichment pipeline - orchestration from raw URL to analysis.
//!
//! The pipeline wires together:
//! - URL normalization
//! - Bounded-retry fetch + extraction (with the bot-detection degraded pass)
//! - The video-platform resolution path
//! - Prompt construction and the model call
//! - Tolerant parsing and validation of the model output
//! - Fallback record generation for every failure

pub mod enricher;
pub mod fallback;
pub mod parse;
pub mod prompts;
pub mod retry;
pub mod validate;

pub use enricher::Enricher;
pub use fallback::{
    fallback_analysis, TAG_ANALYSIS_FAILED, TAG_INVALID_URL, TAG_RETRY_NEEDED,
};
pub use parse::{extract_json_object, parse_analysis, RawAnalysis};
pub use prompts::{
    analysis_prompt_hash, format_analysis_prompt, ANALYSIS_SYSTEM_PROMPT, VIDEO_ANALYSIS_PROMPT,
    WEB_ANALYSIS_PROMPT,
};
pub use retry::{AttemptState, RetryClass, RetryPolicy, Transition};
pub use validate::{clean_tags, normalize_analysis};
