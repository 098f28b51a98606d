//! Attempt tracking - how many times has this URL been analyzed?
//!
//! The counter is diagnostic state the bookmark layer surfaces to users
//! ("3 failed enrichment attempts"). It is threaded through the pipeline as
//! an injected store with an atomic read-modify-write, so concurrent calls
//! for the same URL produce distinct counts instead of a lost update.
//! Deployments that need cross-process persistence implement this trait
//! over their own transactional store.

use std::collections::HashMap;
use std::sync::Mutex;

/// Per-URL attempt counter with atomic increment.
pub trait AttemptStore: Send + Sync {
    /// Record one attempt for `url`, returning the new total (>= 1).
    fn record(&self, url: &str) -> u32;

    /// Current count for `url` without incrementing.
    fn attempts(&self, url: &str) -> u32;
}

/// In-process attempt store backed by a mutex-guarded map.
///
/// Counts survive for the life of the process only.
#[derive(Debug, Default)]
pub struct MemoryAttemptStore {
    counts: Mutex<HashMap<String, u32>>,
}

impl MemoryAttemptStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttemptStore for MemoryAttemptStore {
    fn record(&self, url: &str) -> u32 {
        let mut counts = self.counts.lock().unwrap();
        let count = counts.entry(url.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    fn attempts(&self, url: &str) -> u32 {
        self.counts.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}
