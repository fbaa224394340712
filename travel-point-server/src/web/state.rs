//! Application state for the web layer.

use std::sync::Arc;

use crate::resolver::Resolver;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Resolver over the loaded reference data
    pub resolver: Arc<Resolver>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}
