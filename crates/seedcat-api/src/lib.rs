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

//! HTTP surface of the provenance graph renderer.
//!
//! Layout: `http/router.rs` (`ApiServer`), `http/render.rs` (render endpoint),
//! `http/health.rs`, `http/errors.rs` (problem responses), `state.rs`, `error.rs`.

pub mod error;
pub mod http;
pub mod state;

pub use error::{ApiServerError, ApiServerResult};
pub use http::router::ApiServer;
pub use state::ApiState;
