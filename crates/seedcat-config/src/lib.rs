#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(unused, unreachable_pub, missing_docs)]
#![allow(clippy::module_name_repetitions)]

//! Environment-driven configuration for the graph render service.
//!
//! Layout: `service.rs` (`ServiceConfig` loading and validation), `error.rs`.

pub mod error;
pub mod service;

pub use error::{ConfigError, ConfigResult};
pub use service::{
    DEFAULT_BIND_ADDR, ENV_BIND_ADDR, ENV_GRAPH_DPI, ENV_GRAPHVIZ_DOT, ENV_LOG_FORMAT,
    ENV_LOG_LEVEL, ServiceConfig,
};
