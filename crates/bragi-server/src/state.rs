//! Shared application state for the HTTP handlers.

use std::sync::Arc;

use bragi_core::scenario::ScenarioRepository;

/// State cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ScenarioRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn ScenarioRepository>) -> Self {
        Self { repository }
    }
}
