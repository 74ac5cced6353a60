//! Shared handler state.

use std::sync::Arc;

use seedcat_prov::{GraphRenderer, RenderOptions};

/// Dependencies available to every handler.
#[derive(Clone)]
pub struct ApiState {
    pub(crate) renderer: Arc<dyn GraphRenderer>,
    pub(crate) options: RenderOptions,
}

impl ApiState {
    /// State rendering through `renderer` with `options`.
    #[must_use]
    pub fn new(renderer: Arc<dyn GraphRenderer>, options: RenderOptions) -> Self {
        Self { renderer, options }
    }
}
