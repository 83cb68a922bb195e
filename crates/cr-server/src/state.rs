//! Application state shared across all handlers.

use cr_router::ResolvedConfig;
use cr_session::{SessionOverrideStore, StatsTracker};
use std::sync::Arc;

/// Shared application state. The resolved config is read-only for the life
/// of the server; stats and session overrides are internally synchronised.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ResolvedConfig>,
    pub stats: Arc<StatsTracker>,
    pub sessions: Arc<SessionOverrideStore>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: ResolvedConfig) -> Self {
        Self::with_sessions(config, SessionOverrideStore::new())
    }

    pub fn with_sessions(config: ResolvedConfig, sessions: SessionOverrideStore) -> Self {
        Self {
            config: Arc::new(config),
            stats: Arc::new(StatsTracker::new()),
            sessions: Arc::new(sessions),
            start_time: std::time::Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ResolvedConfig::default())
    }
}
