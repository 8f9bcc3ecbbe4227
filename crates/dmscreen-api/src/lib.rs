//! DM Screen API — HTTP and WebSocket surface of the sync server.

pub mod config;
pub mod error;
pub mod fs_adventure_repository;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the application router without middleware layers.
pub fn app(app_state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::adventure::router())
        .merge(routes::sync::router())
        .with_state(app_state)
}
