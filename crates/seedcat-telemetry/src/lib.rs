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

//! Logging and request-tracing helpers shared by the seedcat binaries.
//!
//! Layout: `init.rs` (subscriber installation, log formats, build SHA), `layers.rs`
//! (`x-request-id` middleware), `error.rs`.

pub mod error;
pub mod init;
pub mod layers;

pub use error::{TelemetryError, TelemetryResult};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use layers::{propagate_request_id_layer, set_request_id_layer};
