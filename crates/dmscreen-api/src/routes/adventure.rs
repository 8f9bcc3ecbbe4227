//! Read-only adventure documents.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use dmscreen_core::adventure::Adventure;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /adventure/{id}
#[instrument(skip(state))]
async fn get_adventure(
    State(state): State<AppState>,
    Path(adventure_id): Path<String>,
) -> Result<Json<Adventure>, ApiError> {
    let adventure = state.adventures.load_adventure(&adventure_id).await?;
    Ok(Json(adventure))
}

/// Returns the router for adventure documents.
pub fn router() -> Router<AppState> {
    Router::new().route("/adventure/{adventure_id}", get(get_adventure))
}
