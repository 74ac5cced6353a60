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

//! Object-store capability used by the corpus pipeline.
//!
//! Layout: `object.rs` (`ObjectRef` + `ObjectStore` trait), `gcs.rs` (Google Cloud
//! Storage JSON API backend), `error.rs` (transfer errors).

pub mod error;
pub mod gcs;
pub mod object;

pub use error::{StoreError, StoreResult};
pub use gcs::{DEFAULT_GCS_ENDPOINT, DEFAULT_TIMEOUT, GcsConfig, GcsStore};
pub use object::{ObjectRef, ObjectStore};
