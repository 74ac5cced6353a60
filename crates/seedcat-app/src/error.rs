//! # Design
//!
//! - Centralize bootstrap errors for the render service.
//! - Keep error messages constant while carrying the failed operation as a field.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: seedcat_config::ConfigError,
    },
    /// Logging could not be installed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: seedcat_telemetry::TelemetryError,
    },
    /// The HTTP server failed to start or stopped with an error.
    #[error("api server operation failed")]
    ApiServer {
        /// Operation identifier.
        operation: &'static str,
        /// Source API server error.
        source: seedcat_api::ApiServerError,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: seedcat_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: seedcat_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn api_server(
        operation: &'static str,
        source: seedcat_api::ApiServerError,
    ) -> Self {
        Self::ApiServer { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn app_error_helpers_build_variants() {
        let config = AppError::config(
            "service_config.from_env",
            seedcat_config::ConfigError::InvalidField {
                field: "SEEDCAT_GRAPH_DPI",
                reason: "not_a_positive_integer",
                value: Some("0".to_string()),
            },
        );
        assert!(matches!(config, AppError::Config { .. }));
        assert!(config.source().is_some());

        let telemetry = AppError::telemetry(
            "telemetry.init",
            seedcat_telemetry::TelemetryError::UnknownLogFormat {
                value: "xml".to_string(),
            },
        );
        assert_eq!(telemetry.to_string(), "telemetry operation failed");

        let api = AppError::api_server(
            "api_server.serve",
            seedcat_api::ApiServerError::Serve {
                source: io::Error::other("io"),
            },
        );
        assert!(matches!(
            api,
            AppError::ApiServer {
                operation: "api_server.serve",
                ..
            }
        ));
    }
}
