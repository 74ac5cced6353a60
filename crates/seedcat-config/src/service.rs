//! Render service settings.
//!
//! Values come from `SEEDCAT_*` environment variables; unset or blank variables fall back
//! to defaults, and set variables must parse.

use std::net::SocketAddr;
use std::path::PathBuf;

use seedcat_telemetry::{DEFAULT_LOG_LEVEL, LogFormat};

use crate::error::{ConfigError, ConfigResult};

/// Address the service listens on by default.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Listen address.
pub const ENV_BIND_ADDR: &str = "SEEDCAT_BIND_ADDR";
/// Graphviz executable.
pub const ENV_GRAPHVIZ_DOT: &str = "SEEDCAT_GRAPHVIZ_DOT";
/// Output resolution passed to the renderer.
pub const ENV_GRAPH_DPI: &str = "SEEDCAT_GRAPH_DPI";
/// `json` or `pretty`.
pub const ENV_LOG_FORMAT: &str = "SEEDCAT_LOG_FORMAT";
/// Log level or filter directive.
pub const ENV_LOG_LEVEL: &str = "SEEDCAT_LOG_LEVEL";

/// Resolved render service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Socket address to bind.
    pub bind_addr: SocketAddr,
    /// Graphviz `dot` executable.
    pub dot_program: PathBuf,
    /// Render resolution; renderer default when unset.
    pub dpi: Option<u32>,
    /// Log output format.
    pub log_format: LogFormat,
    /// Log level or filter directive.
    pub log_level: String,
}

impl ServiceConfig {
    /// Load from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when a variable is set to an unusable value.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_addr = read(ENV_BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|_| {
                ConfigError::invalid(
                    ENV_BIND_ADDR,
                    "invalid_socket_addr",
                    &lookup(ENV_BIND_ADDR).unwrap_or_default(),
                )
            })?;

        let dpi = read(ENV_GRAPH_DPI)
            .map(|value| match value.parse::<u32>() {
                Ok(dpi) if dpi > 0 => Ok(dpi),
                _ => Err(ConfigError::invalid(ENV_GRAPH_DPI, "not_a_positive_integer", &value)),
            })
            .transpose()?;

        let log_format = read(ENV_LOG_FORMAT)
            .map(|value| {
                value
                    .parse::<LogFormat>()
                    .map_err(|_| ConfigError::invalid(ENV_LOG_FORMAT, "unknown_log_format", &value))
            })
            .transpose()?
            .unwrap_or_else(LogFormat::infer);

        Ok(Self {
            bind_addr,
            dot_program: read(ENV_GRAPHVIZ_DOT)
                .map_or_else(|| PathBuf::from("dot"), PathBuf::from),
            dpi,
            log_format,
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> ConfigResult<ServiceConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        ServiceConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() -> ConfigResult<()> {
        let config = load(&[])?;
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 5000)));
        assert_eq!(config.dot_program, PathBuf::from("dot"));
        assert_eq!(config.dpi, None);
        assert_eq!(config.log_format, LogFormat::infer());
        assert_eq!(config.log_level, "info");
        Ok(())
    }

    #[test]
    fn overrides_are_parsed() -> ConfigResult<()> {
        let config = load(&[
            (ENV_BIND_ADDR, "0.0.0.0:8080"),
            (ENV_GRAPHVIZ_DOT, "/usr/local/bin/dot"),
            (ENV_GRAPH_DPI, "150"),
            (ENV_LOG_FORMAT, "json"),
            (ENV_LOG_LEVEL, "debug"),
        ])?;
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.dot_program, PathBuf::from("/usr/local/bin/dot"));
        assert_eq!(config.dpi, Some(150));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "debug");
        Ok(())
    }

    #[test]
    fn blank_values_fall_back_to_defaults() -> ConfigResult<()> {
        let config = load(&[(ENV_BIND_ADDR, "  "), (ENV_GRAPH_DPI, "")])?;
        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.dpi, None);
        Ok(())
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let cases = [
            (ENV_BIND_ADDR, "localhost", "invalid_socket_addr"),
            (ENV_GRAPH_DPI, "0", "not_a_positive_integer"),
            (ENV_GRAPH_DPI, "high", "not_a_positive_integer"),
            (ENV_LOG_FORMAT, "xml", "unknown_log_format"),
        ];
        for (name, value, expected) in cases {
            match load(&[(name, value)]) {
                Err(ConfigError::InvalidField {
                    field,
                    reason,
                    value: Some(got),
                }) => {
                    assert_eq!(field, name);
                    assert_eq!(reason, expected);
                    assert_eq!(got, value);
                }
                other => panic!("expected invalid {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn detail_renders_field_and_value() {
        let err = ConfigError::invalid(ENV_GRAPH_DPI, "not_a_positive_integer", "0");
        assert_eq!(
            err.detail(),
            "invalid configuration field (SEEDCAT_GRAPH_DPI: not_a_positive_integer, value '0')"
        );
    }
}
