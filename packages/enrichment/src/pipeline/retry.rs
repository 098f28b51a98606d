//! Bounded-retry state machine with exponential backoff.
//!
//! The retry decision is a pure transition function over an explicit
//! state, so terminal conditions and backoff timing are testable without
//! mocking the network. The pipeline loop owns the actual sleeping.

use std::time::Duration;

use crate::error::EnrichError;

/// How a failure should be treated by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// Worth retrying the same strategy with backoff
    Transient,

    /// Bot detection - one alternate-metadata pass, no same-strategy retry
    BotDetected,

    /// No retry can help
    Fatal,
}

/// Classify an error for retry purposes.
pub fn classify(error: &EnrichError) -> RetryClass {
    if error.is_bot_detection() {
        RetryClass::BotDetected
    } else if error.is_transient() {
        RetryClass::Transient
    } else {
        RetryClass::Fatal
    }
}

/// Orchestrator state across attempts for a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// About to run attempt `attempt` (0-based)
    Attempting { attempt: u32 },

    /// A usable result was produced
    Succeeded,

    /// Bot detection hit - try the alternate-metadata pass
    DegradedPass,

    /// Retry budget spent
    Exhausted,

    /// A non-transient failure occurred
    NonRetryable,
}

/// What the orchestrator should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Wait `delay`, then re-enter `Attempting` with the next attempt
    Retry { delay: Duration },

    /// Run the social-preview alternate pass
    Degrade,

    /// Stop and route to the fallback generator
    GiveUp,
}

/// Retry policy: bounded attempts, exponential backoff, no jitter.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// Backoff delay before re-running after attempt `attempt` failed:
    /// `initial_delay * 2^attempt`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.initial_delay * 2u32.saturating_pow(attempt)
    }

    /// Pure transition function: given the failed attempt's state and the
    /// failure class, decide what happens next.
    pub fn on_failure(&self, state: AttemptState, class: RetryClass) -> (AttemptState, Transition) {
        let attempt = match state {
            AttemptState::Attempting { attempt } => attempt,
            // Terminal states stay terminal.
            _ => return (state, Transition::GiveUp),
        };

        match class {
            RetryClass::Transient if attempt + 1 < self.max_retries => (
                AttemptState::Attempting {
                    attempt: attempt + 1,
                },
                Transition::Retry {
                    delay: self.backoff_delay(attempt),
                },
            ),
            RetryClass::Transient => (AttemptState::Exhausted, Transition::GiveUp),
            RetryClass::BotDetected => (AttemptState::DegradedPass, Transition::Degrade),
            RetryClass::Fatal => (AttemptState::NonRetryable, Transition::GiveUp),
        }
    }
}
