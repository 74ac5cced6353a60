//! Shared error type and object-store construction for the CLI.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use seedcat_store::{GcsConfig, GcsStore, ObjectStore, StoreError};

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Object-store connection flags shared by the download commands.
#[derive(Debug, Clone)]
pub(crate) struct StoreSettings {
    pub(crate) endpoint: String,
    pub(crate) token: Option<String>,
    pub(crate) timeout_secs: u64,
}

impl StoreSettings {
    /// Build a store reading `bucket`.
    pub(crate) fn open(&self, bucket: &str) -> CliResult<Arc<dyn ObjectStore>> {
        let config = GcsConfig {
            endpoint: self.endpoint.clone(),
            bucket: bucket.to_string(),
            bearer_token: self.token.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        };
        match GcsStore::new(config) {
            Ok(store) => Ok(Arc::new(store)),
            Err(err @ StoreError::InvalidConfig { .. }) => Err(CliError::validation(err.detail())),
            Err(err) => Err(CliError::failure(err)),
        }
    }
}
