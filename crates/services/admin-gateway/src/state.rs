//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::UserBackend;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn UserBackend>,
}

impl AppState {
    pub fn new(backend: Arc<dyn UserBackend>) -> Self {
        Self { backend }
    }
}
