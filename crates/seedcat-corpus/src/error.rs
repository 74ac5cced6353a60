//! # Design
//!
//! - Constant messages with structured context, mirroring the storage errors.
//! - Malformed keys are reported, never escalated, by the fetcher; the variant exists so
//!   callers and sinks can describe why an object was skipped.

use std::error::Error as _;
use std::io;
use std::path::PathBuf;

use seedcat_store::StoreError;
use thiserror::Error;

/// Result alias for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Errors produced by the corpus pipeline.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The object key does not carry a parseable ordering index.
    #[error("malformed object key")]
    MalformedKey {
        /// Offending key.
        key: String,
        /// Machine-readable reason.
        reason: &'static str,
    },
    /// Listing the candidate objects failed.
    #[error("object listing failed")]
    Listing {
        /// Prefix that was being listed.
        prefix: String,
        /// Underlying storage error.
        source: StoreError,
    },
    /// Writing corpus output failed.
    #[error("corpus io failure")]
    Io {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl CorpusError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Human-readable description including context fields and the source chain.
    #[must_use]
    pub fn detail(&self) -> String {
        let mut detail = match self {
            Self::MalformedKey { key, reason } => format!("{self} '{key}' ({reason})"),
            Self::Listing { prefix, source } => {
                return format!("{self} for prefix '{prefix}': {}", source.detail());
            }
            Self::Io {
                operation, path, ..
            } => format!("{self} ({operation} {})", path.display()),
        };
        let mut source = self.source();
        while let Some(err) = source {
            detail.push_str(": ");
            detail.push_str(&err.to_string());
            source = err.source();
        }
        detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_describes_each_variant() {
        let malformed = CorpusError::MalformedKey {
            key: "en/abc/prov.json".to_string(),
            reason: "non_numeric_index",
        };
        assert_eq!(
            malformed.detail(),
            "malformed object key 'en/abc/prov.json' (non_numeric_index)"
        );

        let listing = CorpusError::Listing {
            prefix: "en/".to_string(),
            source: StoreError::status("list", "en/", 403),
        };
        assert_eq!(
            listing.detail(),
            "object listing failed for prefix 'en/': storage returned an error status (list en/: HTTP 403)"
        );

        let io_err = CorpusError::io(
            "write_corpus",
            "out/corpus.txt",
            io::Error::other("disk full"),
        );
        assert_eq!(
            io_err.detail(),
            "corpus io failure (write_corpus out/corpus.txt): disk full"
        );
    }
}
