//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::AuthBackend;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn AuthBackend>,
}

impl AppState {
    /// Create new app state.
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self { backend }
    }
}
