//! Per-item result of a fetch.

use seedcat_store::{ObjectRef, StoreError};

use crate::key::OrderingIndex;

/// Outcome of fetching one admitted object.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The object content was downloaded.
    Success {
        /// Ordering index taken from the key.
        index: OrderingIndex,
        /// Object key.
        key: String,
        /// Downloaded text.
        content: String,
    },
    /// The download failed; the failure is confined to this item.
    Failure {
        /// Ordering index taken from the key.
        index: OrderingIndex,
        /// Object that could not be fetched.
        object: ObjectRef,
        /// Transfer error.
        error: StoreError,
    },
}

impl FetchOutcome {
    /// Ordering index of the item.
    #[must_use]
    pub const fn index(&self) -> OrderingIndex {
        match self {
            Self::Success { index, .. } | Self::Failure { index, .. } => *index,
        }
    }

    /// Object key of the item.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Success { key, .. } => key,
            Self::Failure { object, .. } => object.key(),
        }
    }

    /// Whether the fetch succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Downloaded content for successful items.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Success { content, .. } => Some(content),
            Self::Failure { .. } => None,
        }
    }
}
