//! Bounded concurrent download of the admitted objects under a prefix.
//!
//! # Design
//! - Index extraction and range filtering run on the listing, so rejected objects never
//!   cost a request.
//! - At most `concurrency` downloads are in flight; completion order is not preserved.
//! - A failed download becomes a [`FetchOutcome::Failure`] and never aborts its siblings.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use seedcat_store::{ObjectRef, ObjectStore};
use tracing::{debug, info};

use crate::error::{CorpusError, CorpusResult};
use crate::key::{OrderingIndex, SelectionRange, SuffixFilter, extract_index};
use crate::outcome::FetchOutcome;
use crate::report::ReportingSink;

/// Default number of downloads allowed in flight.
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Lists, filters, and downloads corpus objects through an [`ObjectStore`].
#[derive(Clone)]
pub struct CorpusFetcher {
    store: Arc<dyn ObjectStore>,
    sink: Arc<dyn ReportingSink>,
    concurrency: usize,
}

impl CorpusFetcher {
    /// Fetcher over `store` reporting to `sink` with [`DEFAULT_CONCURRENCY`].
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, sink: Arc<dyn ReportingSink>) -> Self {
        Self {
            store,
            sink,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Override the in-flight limit. Values below one are clamped to one.
    #[must_use]
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    /// Effective in-flight limit.
    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Select the objects worth fetching from a listing.
    ///
    /// Keys failing `suffix` are ignored silently, malformed keys are reported to the sink,
    /// and indices outside `range` are dropped.
    #[must_use]
    pub fn admit(
        &self,
        objects: Vec<ObjectRef>,
        suffix: &SuffixFilter,
        range: SelectionRange,
    ) -> Vec<(OrderingIndex, ObjectRef)> {
        let mut admitted = Vec::new();
        for object in objects {
            if !suffix.matches(object.key()) {
                continue;
            }
            match extract_index(object.key()) {
                Ok(index) if range.contains(index) => admitted.push((index, object)),
                Ok(index) => debug!(
                    key = %object.key(),
                    index = index.get(),
                    %range,
                    "object outside selection range"
                ),
                Err(err) => self.sink.skipped(object.key(), &err),
            }
        }
        admitted
    }

    /// List `prefix`, admit matching objects, and download them concurrently.
    ///
    /// Resolves once every admitted download has completed. The returned outcomes are
    /// in completion order.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::Listing`] when the listing itself fails. Per-item download
    /// failures are reported as [`FetchOutcome::Failure`] instead.
    pub async fn fetch_all(
        &self,
        prefix: &str,
        suffix: &SuffixFilter,
        range: SelectionRange,
    ) -> CorpusResult<Vec<FetchOutcome>> {
        let listed = self
            .store
            .list(prefix)
            .await
            .map_err(|source| CorpusError::Listing {
                prefix: prefix.to_string(),
                source,
            })?;
        let listed_count = listed.len();

        let admitted = self.admit(listed, suffix, range);
        info!(
            prefix,
            suffix = suffix.as_str(),
            listed = listed_count,
            admitted = admitted.len(),
            %range,
            "found objects to download"
        );

        let outcomes = stream::iter(admitted)
            .map(|(index, object)| self.fetch_one(index, object))
            .buffer_unordered(self.concurrency)
            .collect::<Vec<_>>()
            .await;
        Ok(outcomes)
    }

    async fn fetch_one(&self, index: OrderingIndex, object: ObjectRef) -> FetchOutcome {
        let outcome = match self.store.fetch_text(&object).await {
            Ok(content) => FetchOutcome::Success {
                index,
                key: object.key,
                content,
            },
            Err(error) => FetchOutcome::Failure {
                index,
                object,
                error,
            },
        };
        self.sink.record(&outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use anyhow::Result;
    use seedcat_test_support::MemoryStore;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        recorded: Mutex<Vec<(String, bool)>>,
        skipped: Mutex<Vec<String>>,
    }

    impl ReportingSink for RecordingSink {
        fn record(&self, outcome: &FetchOutcome) {
            self.recorded
                .lock()
                .expect("recorded lock")
                .push((outcome.key().to_string(), outcome.is_success()));
        }

        fn skipped(&self, key: &str, _error: &CorpusError) {
            self.skipped
                .lock()
                .expect("skipped lock")
                .push(key.to_string());
        }
    }

    fn fetcher(store: &Arc<MemoryStore>, sink: &Arc<RecordingSink>) -> CorpusFetcher {
        CorpusFetcher::new(store.clone(), sink.clone())
    }

    #[test]
    fn concurrency_is_clamped_to_one() {
        let store = Arc::new(MemoryStore::new());
        let sink = Arc::new(RecordingSink::default());
        assert_eq!(fetcher(&store, &sink).concurrency(), DEFAULT_CONCURRENCY);
        assert_eq!(fetcher(&store, &sink).with_concurrency(0).concurrency(), 1);
        assert_eq!(fetcher(&store, &sink).with_concurrency(4).concurrency(), 4);
    }

    #[tokio::test]
    async fn out_of_range_objects_are_never_fetched() -> Result<()> {
        let store = Arc::new(
            MemoryStore::new()
                .with_text("p/1/translation.txt", "one")
                .with_text("p/2/translation.txt", "two")
                .with_text("p/3/translation.txt", "three")
                .with_text("p/4/translation.txt", "four"),
        );
        let sink = Arc::new(RecordingSink::default());

        let outcomes = fetcher(&store, &sink)
            .fetch_all(
                "p/",
                &SuffixFilter::new("translation.txt"),
                SelectionRange::new(2, 3),
            )
            .await?;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(store.fetch_count(), 2);
        assert_eq!(
            store.fetched_keys(),
            ["p/2/translation.txt", "p/3/translation.txt"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn suffix_filter_limits_candidates() -> Result<()> {
        let store = Arc::new(
            MemoryStore::new()
                .with_text("en/1/translation.txt", "hello")
                .with_text("en/1/prov.json", "{}")
                .with_text("en/2/prov.json", "{}")
                .with_text("en/notes.md", "ignored"),
        );
        let sink = Arc::new(RecordingSink::default());

        let outcomes = fetcher(&store, &sink)
            .fetch_all("en/", &SuffixFilter::new("prov.json"), SelectionRange::new(1, 10))
            .await?;

        let mut keys: Vec<&str> = outcomes.iter().map(FetchOutcome::key).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["en/1/prov.json", "en/2/prov.json"]);
        assert!(sink.skipped.lock().expect("skipped lock").is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn malformed_keys_are_reported_and_skipped() -> Result<()> {
        let store = Arc::new(
            MemoryStore::new()
                .with_text("p/draft/translation.txt", "draft")
                .with_text("p/1/translation.txt", "one"),
        );
        let sink = Arc::new(RecordingSink::default());

        let outcomes = fetcher(&store, &sink)
            .fetch_all(
                "p/",
                &SuffixFilter::new("translation.txt"),
                SelectionRange::new(0, 100),
            )
            .await?;

        assert_eq!(outcomes.len(), 1);
        assert_eq!(store.fetched_keys(), ["p/1/translation.txt"]);
        assert_eq!(
            *sink.skipped.lock().expect("skipped lock"),
            ["p/draft/translation.txt"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn failures_stay_confined_to_their_item() -> Result<()> {
        let store = Arc::new(
            MemoryStore::new()
                .with_text("p/1/translation.txt", "c1")
                .with_failure("p/2/translation.txt", 503)
                .with_text("p/3/translation.txt", "c3"),
        );
        let sink = Arc::new(RecordingSink::default());

        let outcomes = fetcher(&store, &sink)
            .fetch_all(
                "p/",
                &SuffixFilter::new("translation.txt"),
                SelectionRange::new(1, 3),
            )
            .await?;

        assert_eq!(outcomes.len(), 3);
        let failed: Vec<&FetchOutcome> = outcomes.iter().filter(|o| !o.is_success()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].index(), OrderingIndex::new(2));
        assert_eq!(sink.recorded.lock().expect("recorded lock").len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn in_flight_downloads_respect_the_limit() -> Result<()> {
        let mut store = MemoryStore::new();
        for index in 1..=8 {
            store = store.with_delayed_text(
                format!("p/{index}/translation.txt"),
                format!("line {index}"),
                Duration::from_millis(20),
            );
        }
        let store = Arc::new(store);
        let sink = Arc::new(RecordingSink::default());

        let outcomes = fetcher(&store, &sink)
            .with_concurrency(3)
            .fetch_all(
                "p/",
                &SuffixFilter::new("translation.txt"),
                SelectionRange::new(1, 8),
            )
            .await?;

        assert_eq!(outcomes.len(), 8);
        assert_eq!(store.max_in_flight(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn listing_failure_is_fatal() {
        let store = Arc::new(MemoryStore::new().failing_listing(403));
        let sink = Arc::new(RecordingSink::default());

        let err = fetcher(&store, &sink)
            .fetch_all("p/", &SuffixFilter::new(""), SelectionRange::new(1, 5))
            .await
            .err();

        assert!(matches!(err, Some(CorpusError::Listing { ref prefix, .. }) if prefix == "p/"));
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn empty_range_fetches_nothing() -> Result<()> {
        let store = Arc::new(MemoryStore::new().with_text("p/1/translation.txt", "one"));
        let sink = Arc::new(RecordingSink::default());

        let outcomes = fetcher(&store, &sink)
            .fetch_all("p/", &SuffixFilter::new(""), SelectionRange::new(5, 1))
            .await?;

        assert!(outcomes.is_empty());
        assert_eq!(store.fetch_count(), 0);
        Ok(())
    }
}
