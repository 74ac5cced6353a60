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

//! Index-addressed corpus pipeline: list, filter, fetch concurrently, reassemble.
//!
//! Layout: `key.rs` (index extraction, range and suffix filters), `kind.rs` (corpus
//! layouts), `fetch.rs` (bounded concurrent fetcher), `outcome.rs` (per-item results),
//! `assemble.rs` (ordered corpus and per-index files), `report.rs` (progress sinks),
//! `error.rs`.

pub mod assemble;
pub mod error;
pub mod fetch;
pub mod key;
pub mod kind;
pub mod outcome;
pub mod report;

pub use assemble::{Corpus, PersistSummary, assemble_ordered, persist_per_index};
pub use error::{CorpusError, CorpusResult};
pub use fetch::{CorpusFetcher, DEFAULT_CONCURRENCY};
pub use key::{KEY_DELIMITER, OrderingIndex, SelectionRange, SuffixFilter, extract_index};
pub use kind::CorpusKind;
pub use outcome::FetchOutcome;
pub use report::{LogSink, ReportingSink};
