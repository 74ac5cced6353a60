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

//! Provenance documents (PROV-JSON), their graphs, and image rendering.
//!
//! Layout: `model.rs` (document parsing), `graph.rs` (petgraph model + DOT),
//! `format.rs` (image formats), `render.rs` (renderer seam, Graphviz backend, file
//! output), `error.rs`.

pub mod error;
pub mod format;
pub mod graph;
pub mod model;
pub mod render;

pub use error::{ProvError, ProvResult};
pub use format::ImageFormat;
pub use graph::{NodeStyle, ProvGraph, ProvNode};
pub use model::{Element, ElementKind, ProvDocument, Relation, RelationKind};
pub use render::{
    DEFAULT_DOT_PROGRAM, GraphRenderer, GraphvizRenderer, PRINT_DPI, RenderOptions,
    render_document, render_to_file,
};
