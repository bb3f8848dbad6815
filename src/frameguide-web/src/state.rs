//! Shared application state

use frameguide_frame::{Catalog, Renderer};
use std::sync::Arc;

/// Shared state across all handlers, read-only after startup
#[derive(Clone)]
pub struct AppState {
    /// Page table
    pub catalog: &'static Catalog,

    /// Frame renderer (title and paths)
    pub renderer: Arc<Renderer>,

    /// Public base URL, without a trailing slash
    pub base_url: Arc<str>,
}

impl AppState {
    /// Create new application state
    pub fn new(catalog: &'static Catalog, renderer: Renderer, base_url: &str) -> Self {
        Self {
            catalog,
            renderer: Arc::new(renderer),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }
}
