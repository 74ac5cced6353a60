//! Observation hooks for per-item progress.

use tracing::{info, warn};

use crate::error::CorpusError;
use crate::outcome::FetchOutcome;

/// Receives one notification per completed fetch and per skipped object.
///
/// Sinks observe only; they cannot alter outcomes.
pub trait ReportingSink: Send + Sync {
    /// Called once per completed fetch, in completion order.
    fn record(&self, outcome: &FetchOutcome);

    /// Called for a listed object that was never fetched because its key is unusable.
    fn skipped(&self, key: &str, error: &CorpusError);
}

/// Sink emitting one `tracing` event per notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ReportingSink for LogSink {
    fn record(&self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Success {
                index,
                key,
                content,
            } => info!(
                key = %key,
                index = index.get(),
                bytes = content.len(),
                "downloaded object"
            ),
            FetchOutcome::Failure {
                index,
                object,
                error,
            } => warn!(
                key = %object.key(),
                index = index.get(),
                error = %error.detail(),
                "failed to download object"
            ),
        }
    }

    fn skipped(&self, key: &str, error: &CorpusError) {
        warn!(key = %key, error = %error.detail(), "skipping object with malformed key");
    }
}
