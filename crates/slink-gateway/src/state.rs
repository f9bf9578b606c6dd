use std::sync::Arc;

use slink_core::LinkStore;

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn LinkStore>,
    base_url: String,
}

impl AppState {
    pub fn new(store: Arc<dyn LinkStore>, public_base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: public_base_url.into(),
        }
    }

    pub fn store(&self) -> &dyn LinkStore {
        self.store.as_ref()
    }

    /// Base URL short links are built on, e.g. `https://sl.ink`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
