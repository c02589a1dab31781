//! Shared application state handed to every handler.

use saral_db::Database;

use crate::config::ServerConfig;

/// Cloned into each handler by axum's `State` extractor. Both fields
/// are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Self {
        AppState { db, config }
    }
}
