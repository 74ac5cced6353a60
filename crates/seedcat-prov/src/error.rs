//! # Design
//!
//! - Document problems (`Json`, `Parse`, `UnsupportedFormat`) are caller mistakes.
//! - Renderer problems (`RendererSpawn`, `RendererFailed`, `Io`) are environment failures.
//! - Messages stay constant; context travels in fields.

use std::error::Error as _;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for provenance operations.
pub type ProvResult<T> = Result<T, ProvError>;

/// Errors produced while parsing, graphing, or rendering provenance documents.
#[derive(Debug, Error)]
pub enum ProvError {
    /// The payload is not JSON.
    #[error("provenance document is not valid json")]
    Json {
        /// Underlying serde error.
        source: serde_json::Error,
    },
    /// The JSON does not have the PROV-JSON shape.
    #[error("provenance document is malformed")]
    Parse {
        /// Section containing the problem.
        section: String,
        /// Record identifier, when the problem is inside a record.
        id: Option<String>,
        /// Machine-readable reason.
        reason: &'static str,
    },
    /// The requested output format is not one the renderer produces.
    #[error("unsupported image format")]
    UnsupportedFormat {
        /// Requested format.
        value: String,
    },
    /// The renderer process could not be started or fed.
    #[error("graph renderer could not be run")]
    RendererSpawn {
        /// Renderer program.
        program: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The renderer process exited unsuccessfully.
    #[error("graph renderer failed")]
    RendererFailed {
        /// Renderer program.
        program: PathBuf,
        /// Exit code, if the process exited normally.
        status: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },
    /// Reading a document or writing an image failed.
    #[error("provenance io failure")]
    Io {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl ProvError {
    pub(crate) fn parse(section: &str, id: Option<&str>, reason: &'static str) -> Self {
        Self::Parse {
            section: section.to_string(),
            id: id.map(str::to_string),
            reason,
        }
    }

    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Whether the error stems from the submitted document or requested format.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Json { .. } | Self::Parse { .. } | Self::UnsupportedFormat { .. }
        )
    }

    /// Human-readable description including context fields and the source chain.
    #[must_use]
    pub fn detail(&self) -> String {
        let mut detail = match self {
            Self::Json { .. } => self.to_string(),
            Self::Parse {
                section,
                id: Some(id),
                reason,
            } => format!("{self} ({section} '{id}': {reason})"),
            Self::Parse {
                section,
                id: None,
                reason,
            } => format!("{self} ({section}: {reason})"),
            Self::UnsupportedFormat { value } => format!("{self} '{value}'"),
            Self::RendererSpawn { program, .. } => format!("{self} ({})", program.display()),
            Self::RendererFailed {
                program,
                status,
                stderr,
            } => {
                let status = status.map_or_else(|| "signal".to_string(), |code| code.to_string());
                if stderr.is_empty() {
                    format!("{self} ({} exit {status})", program.display())
                } else {
                    format!("{self} ({} exit {status}: {stderr})", program.display())
                }
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
