//! Object references and the storage capability consumed by the corpus pipeline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// Handle to a stored object as returned by a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Full hierarchical key, segments separated by `/`.
    pub key: String,
    /// Object size in bytes when the listing reported one.
    pub size: Option<u64>,
}

impl ObjectRef {
    /// Reference an object by key without size metadata.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size: None,
        }
    }

    /// Object key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Listing and download capability of an object store.
///
/// Implementations must be shareable across concurrent fetch tasks.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List every object whose key starts with `prefix`.
    async fn list(&self, prefix: &str) -> StoreResult<Vec<ObjectRef>>;

    /// Download the full content of `object` as UTF-8 text.
    async fn fetch_text(&self, object: &ObjectRef) -> StoreResult<String>;
}
