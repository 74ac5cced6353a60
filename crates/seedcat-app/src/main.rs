#![forbid(unsafe_code)]
#![deny(
    unused,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Binary entrypoint for the provenance graph render service.

use seedcat_app::{AppResult, run_app};

/// Loads configuration and serves until the process is stopped.
#[tokio::main]
async fn main() -> AppResult<()> {
    run_app().await
}
