use std::sync::Arc;

use crate::ai::CompletionProvider;

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }
}
