//! # Design
//!
//! - Every failure talking to the object store collapses into one transfer error type.
//! - Messages stay constant; the operation and the object key travel as fields.
//! - `detail()` renders the full context for per-item log lines.

use std::error::Error as _;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Result alias for object-store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while listing or downloading objects.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store configuration was rejected before any request was made.
    #[error("invalid storage configuration")]
    InvalidConfig {
        /// Field that failed validation.
        field: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
    /// The HTTP request could not be completed.
    #[error("storage request failed")]
    Request {
        /// Operation identifier.
        operation: &'static str,
        /// Object key or prefix the request targeted.
        target: String,
        /// Underlying HTTP client error.
        source: reqwest::Error,
    },
    /// The store answered with a non-success status.
    #[error("storage returned an error status")]
    Status {
        /// Operation identifier.
        operation: &'static str,
        /// Object key or prefix the request targeted.
        target: String,
        /// HTTP status code.
        status: u16,
    },
    /// A listing page could not be decoded.
    #[error("storage listing could not be decoded")]
    Json {
        /// Prefix being listed.
        target: String,
        /// Underlying serde error.
        source: serde_json::Error,
    },
    /// Object content was not valid UTF-8 text.
    #[error("object content is not valid utf-8")]
    Utf8 {
        /// Object key.
        target: String,
        /// Underlying conversion error.
        source: FromUtf8Error,
    },
}

impl StoreError {
    /// Build a status error for the given operation and target.
    #[must_use]
    pub fn status(operation: &'static str, target: impl Into<String>, status: u16) -> Self {
        Self::Status {
            operation,
            target: target.into(),
            status,
        }
    }

    pub(crate) fn request(
        operation: &'static str,
        target: impl Into<String>,
        source: reqwest::Error,
    ) -> Self {
        Self::Request {
            operation,
            target: target.into(),
            source,
        }
    }

    /// Human-readable description including context fields and the source chain.
    #[must_use]
    pub fn detail(&self) -> String {
        let mut detail = match self {
            Self::InvalidConfig {
                field,
                reason,
                value,
            } => match value {
                Some(value) => format!("{self} ({field}: {reason}, value '{value}')"),
                None => format!("{self} ({field}: {reason})"),
            },
            Self::Request {
                operation, target, ..
            } => format!("{self} ({operation} {target})"),
            Self::Status {
                operation,
                target,
                status,
            } => format!("{self} ({operation} {target}: HTTP {status})"),
            Self::Json { target, .. } | Self::Utf8 { target, .. } => {
                format!("{self} ({target})")
            }
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
