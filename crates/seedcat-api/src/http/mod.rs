//! HTTP routing and handlers.

pub(crate) mod constants;
pub(crate) mod errors;
pub(crate) mod health;
pub(crate) mod render;
pub mod router;
