//! Ordering indices derived from object keys, and the filters applied before any fetch.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, CorpusResult};

/// Separator between key segments.
pub const KEY_DELIMITER: char = '/';

/// Position of an object in the corpus, taken from its key path.
///
/// Indices are 1-based: index `i` occupies corpus slot `i - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderingIndex(u64);

impl OrderingIndex {
    /// Wrap a raw index value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw index value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Zero-based slot for a corpus of `declared_size` entries, if the index fits.
    #[must_use]
    pub fn slot(self, declared_size: usize) -> Option<usize> {
        let position = usize::try_from(self.0).ok()?.checked_sub(1)?;
        (position < declared_size).then_some(position)
    }
}

impl From<u64> for OrderingIndex {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for OrderingIndex {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Read the ordering index from the segment preceding the final one, e.g.
/// `en/42/translation.txt` yields `42`.
///
/// # Errors
///
/// Returns [`CorpusError::MalformedKey`] when the key has a single segment or the index
/// segment is not an unsigned decimal integer.
pub fn extract_index(key: &str) -> CorpusResult<OrderingIndex> {
    let malformed = |reason| CorpusError::MalformedKey {
        key: key.to_string(),
        reason,
    };

    let mut segments = key.rsplit(KEY_DELIMITER);
    segments.next();
    let segment = segments
        .next()
        .ok_or_else(|| malformed("missing_index_segment"))?;

    if segment.is_empty() {
        return Err(malformed("empty_index_segment"));
    }
    if !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(malformed("non_numeric_index"));
    }
    segment
        .parse::<u64>()
        .map(OrderingIndex)
        .map_err(|_| malformed("index_out_of_range"))
}

/// Inclusive `[low, high]` window of admitted indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    /// Lowest admitted index.
    pub low: u64,
    /// Highest admitted index.
    pub high: u64,
}

impl SelectionRange {
    /// Build a range; `low > high` yields an empty range.
    #[must_use]
    pub const fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    /// Whether `index` lies inside the window, both bounds included.
    #[must_use]
    pub const fn contains(&self, index: OrderingIndex) -> bool {
        self.low <= index.0 && index.0 <= self.high
    }

    /// Whether the range admits nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.low > self.high
    }
}

impl Display for SelectionRange {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "[{}, {}]", self.low, self.high)
    }
}

/// Key suffix an object must end with to be considered at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixFilter(String);

impl SuffixFilter {
    /// Match keys ending with `suffix`. An empty suffix matches every key.
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }

    /// Whether `key` ends with the configured suffix.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        key.ends_with(self.0.as_str())
    }

    /// Suffix text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
