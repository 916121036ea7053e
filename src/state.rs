//! Shared application state for all routes.

use crate::store::Store;
use std::sync::Arc;

/// The persistence handle is constructed once and injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new<S: Store + 'static>(store: S) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}
