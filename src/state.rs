//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

/// Shared, read-only application state, cloned into every handler.
///
/// Nothing in here is mutated after startup, so requests never coordinate.
#[derive(Clone)]
pub struct AppState {
    pub tera: Arc<Tera>,
}

impl AppState {
    /// Creates a new application state from the compiled templates.
    pub fn new(tera: Tera) -> Self {
        Self {
            tera: Arc::new(tera),
        }
    }
}
