//! DM Screen sync server entry point.

use std::sync::Arc;

use dmscreen_api::config::ServerConfig;
use dmscreen_api::error::AppError;
use dmscreen_api::fs_adventure_repository::FsAdventureRepository;
use dmscreen_api::state::AppState;
use dmscreen_session::application::hub::SessionHub;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting DM Screen sync server");

    let config = ServerConfig::from_env()?;

    // Build application state.
    let app_state = AppState::new(
        Arc::new(SessionHub::new()),
        Arc::new(FsAdventureRepository::new(config.adventure_dir.clone())),
        config.default_session.clone(),
    );

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = dmscreen_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!(
        addr = %config.addr,
        adventure_dir = %config.adventure_dir.display(),
        default_session = %config.default_session,
        "Listening"
    );

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: config.addr,
            source,
        })?;

    axum::serve(listener, app).await?;

    Ok(())
}
