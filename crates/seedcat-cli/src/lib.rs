#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(unused, unreachable_pub, missing_docs)]
#![allow(clippy::redundant_pub_crate)]

//! Command-line entry points for corpus downloads and provenance graph rendering.
//!
//! Layout:
//! - `cli.rs`: argument parsing and command dispatch
//! - `commands/`: command handlers (`fetch.rs` for corpora, `graph.rs` for rendering)
//! - `client.rs`: error type and object-store construction
//! - `output.rs`: run summaries printed to stdout
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod output;

pub use cli::run;
