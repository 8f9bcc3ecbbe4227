//! Health check endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Number of sessions opened since startup.
    pub sessions: usize,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.hub.len().await,
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
