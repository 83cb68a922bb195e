//! Claw Router HTTP API server (Axum).
//!
//! Exposes routing decisions, score-only evaluation, running stats, status
//! and per-session model overrides over JSON.

pub mod error;
pub mod report;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;

/// Build the application router with the default config.
pub fn app() -> Router {
    app_with_state(AppState::default())
}

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::route_routes())
        .merge(routes::session_routes())
        .with_state(state)
}

#[cfg(test)]
mod tests;
