//! Debug sink - optional artifact store for offline troubleshooting.
//!
//! Raw HTML, raw model responses, and extracted content can be written out
//! keyed by URL hash + timestamp. Not required for correctness; the default
//! is a no-op.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use sha2::{Digest, Sha256};

/// Pipeline stages that emit debug artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    RawHtml,
    ExtractedContent,
    ModelResponse,
}

impl ArtifactKind {
    /// Stable label used in artifact keys.
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::RawHtml => "raw_html",
            ArtifactKind::ExtractedContent => "extracted",
            ArtifactKind::ModelResponse => "model_response",
        }
    }
}

/// Build an artifact key: `<url-hash>/<timestamp>/<kind>`.
pub fn artifact_key(url: &str, kind: ArtifactKind) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    format!(
        "{}/{}/{}",
        &hash[..16],
        Utc::now().timestamp_millis(),
        kind.label()
    )
}

/// Troubleshooting artifact store.
pub trait DebugSink: Send + Sync {
    /// Record a pipeline artifact for `url`.
    fn record(&self, url: &str, kind: ArtifactKind, payload: &str);
}

/// Sink that discards everything. The default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DebugSink for NoopSink {
    fn record(&self, _url: &str, _kind: ArtifactKind, _payload: &str) {}
}

/// Sink that keeps artifacts in memory, for tests and local debugging.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RwLock<HashMap<String, Vec<(ArtifactKind, String)>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All artifacts recorded for a URL, in order.
    pub fn artifacts(&self, url: &str) -> Vec<(ArtifactKind, String)> {
        self.records
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether any artifact of `kind` was recorded for `url`.
    pub fn has(&self, url: &str, kind: ArtifactKind) -> bool {
        self.artifacts(url).iter().any(|(k, _)| *k == kind)
    }
}

impl DebugSink for MemorySink {
    fn record(&self, url: &str, kind: ArtifactKind, payload: &str) {
        self.records
            .write()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push((kind, payload.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_keys_embed_kind() {
        let key = artifact_key("https://example.com", ArtifactKind::RawHtml);
        assert!(key.ends_with("/raw_html"));
        assert_eq!(key.split('/').count(), 3);
    }

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.record("https://example.com", ArtifactKind::RawHtml, "<html>");
        sink.record("https://example.com", ArtifactKind::ModelResponse, "{}");

        let artifacts = sink.artifacts("https://example.com");
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].0, ArtifactKind::RawHtml);
        assert!(sink.has("https://example.com", ArtifactKind::ModelResponse));
        assert!(!sink.has("https://example.com", ArtifactKind::ExtractedContent));
    }
}
