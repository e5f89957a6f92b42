use std::sync::Arc;

use crate::storage::LeagueStore;

#[derive(Clone)]
pub struct AppState {
    /// Writers take the lock exclusively so concurrent edits are serialized.
    pub store: Arc<tokio::sync::RwLock<LeagueStore>>,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(store: LeagueStore, cors_origin: impl Into<String>) -> Self {
        Self {
            store: Arc::new(tokio::sync::RwLock::new(store)),
            cors_origin: cors_origin.into(),
        }
    }
}
