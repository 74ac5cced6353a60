//! In-memory object store with call accounting.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use seedcat_store::{ObjectRef, ObjectStore, StoreError, StoreResult};

#[derive(Debug, Clone)]
enum Stored {
    Text(String),
    Failure(u16),
}

#[derive(Debug, Clone)]
struct Entry {
    stored: Stored,
    delay: Option<Duration>,
}

/// Object store double keyed by object name.
///
/// Listing returns keys in lexical order. Fetching an unknown key yields a 404 status
/// error. Every fetch is counted, and the peak number of concurrent fetches is tracked.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: BTreeMap<String, Entry>,
    listing_failure: Option<u16>,
    fetches: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    fetched: Mutex<Vec<String>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `content` under `key`.
    #[must_use]
    pub fn with_text(self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(key.into(), Stored::Text(content.into()), None)
    }

    /// Store `content` under `key`, answering fetches only after `delay`.
    #[must_use]
    pub fn with_delayed_text(
        self,
        key: impl Into<String>,
        content: impl Into<String>,
        delay: Duration,
    ) -> Self {
        self.insert(key.into(), Stored::Text(content.into()), Some(delay))
    }

    /// List `key` but fail every fetch of it with `status`.
    #[must_use]
    pub fn with_failure(self, key: impl Into<String>, status: u16) -> Self {
        self.insert(key.into(), Stored::Failure(status), None)
    }

    /// Fail every listing with `status`.
    #[must_use]
    pub const fn failing_listing(mut self, status: u16) -> Self {
        self.listing_failure = Some(status);
        self
    }

    fn insert(mut self, key: String, stored: Stored, delay: Option<Duration>) -> Self {
        self.objects.insert(key, Entry { stored, delay });
        self
    }

    /// Number of fetches issued so far.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Keys fetched so far, sorted.
    #[must_use]
    pub fn fetched_keys(&self) -> Vec<String> {
        let mut keys = self
            .fetched
            .lock()
            .map(|keys| keys.clone())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Highest number of fetches observed in flight at once.
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectRef>> {
        if let Some(status) = self.listing_failure {
            return Err(StoreError::status("list", prefix, status));
        }
        Ok(self
            .objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, entry)| ObjectRef {
                key: key.clone(),
                size: match &entry.stored {
                    Stored::Text(text) => u64::try_from(text.len()).ok(),
                    Stored::Failure(_) => None,
                },
            })
            .collect())
    }

    async fn fetch_text(&self, object: &ObjectRef) -> StoreResult<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.push(object.key.clone());
        }
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let entry = self.objects.get(&object.key);
        if let Some(delay) = entry.and_then(|entry| entry.delay) {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match entry.map(|entry| &entry.stored) {
            Some(Stored::Text(text)) => Ok(text.clone()),
            Some(Stored::Failure(status)) => {
                Err(StoreError::status("fetch_text", &object.key, *status))
            }
            None => Err(StoreError::status("fetch_text", &object.key, 404)),
        }
    }
}
