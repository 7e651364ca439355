//! Shared application state.

use std::sync::Arc;

use jobdeck_store::JobStore;

use crate::job::JobRegistrar;

/// State shared across request handlers.
pub struct AppState {
    /// Persistence handle.
    pub store: Arc<dyn JobStore>,
    /// Scheduler registration sink.
    pub registrar: Arc<dyn JobRegistrar>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Arc<dyn JobStore>, registrar: Arc<dyn JobRegistrar>) -> Self {
        Self { store, registrar }
    }
}
