#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(unused)]

//! Shared test helpers used across integration suites.
//! Layout: fixtures.rs (environment probes), mocks.rs (in-memory object store).

pub mod fixtures;
pub mod mocks;

pub use fixtures::graphviz_available;
pub use mocks::MemoryStore;
