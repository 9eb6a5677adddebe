use std::sync::Arc;

use navdir_core::session::SessionManager;
use navdir_db::NavigationStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (admin secret, timeouts, directories).
    pub config: Arc<ServerConfig>,
    /// Registry of live administrator sessions. Empty at process start.
    pub sessions: Arc<SessionManager>,
    /// Owner of the persisted navigation collection.
    pub store: Arc<NavigationStore>,
}

impl AppState {
    /// Assemble state from a configuration, using wall-clock session expiry.
    pub fn new(config: ServerConfig) -> Self {
        let sessions = SessionManager::new(config.session_timeout());
        Self::with_sessions(config, sessions)
    }

    /// Assemble state around an already-built session registry.
    pub fn with_sessions(config: ServerConfig, sessions: SessionManager) -> Self {
        let store = NavigationStore::new(config.data_dir.clone());
        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            store: Arc::new(store),
        }
    }
}
