//! Error types for configuration loading.

use thiserror::Error;

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Primary error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable held a value that could not be used.
    #[error("invalid configuration field")]
    InvalidField {
        /// Environment variable that failed validation.
        field: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str, value: &str) -> Self {
        Self::InvalidField {
            field,
            reason,
            value: Some(value.to_string()),
        }
    }

    /// Human-readable description including context fields.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidField {
                field,
                reason,
                value: Some(value),
            } => format!("{self} ({field}: {reason}, value '{value}')"),
            Self::InvalidField {
                field,
                reason,
                value: None,
            } => format!("{self} ({field}: {reason})"),
        }
    }
}
