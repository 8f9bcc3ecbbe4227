//! Headless player display: joins a session and logs what players see.

use std::sync::Arc;

use dmscreen_client::adapter::SyncClient;
use dmscreen_client::adventure::AdventureClient;
use dmscreen_client::config::ClientConfig;
use dmscreen_client::error::ClientError;
use dmscreen_client::view::{PlayerView, PlayerViewState};
use tracing_subscriber::EnvFilter;

fn log_view(state: &PlayerViewState) {
    if !state.is_renderable() {
        return;
    }

    let playing = state.current_player();
    let on_deck = state.next_player();
    tracing::info!(
        round = state.initiative.round,
        playing = playing.map(|p| p.name.as_str()),
        playing_image = playing.map(|p| p.image_or_default()),
        on_deck = on_deck.map(|p| p.name.as_str()),
        on_deck_image = on_deck.map(|p| p.image_or_default()),
        connection = ?state.connection,
        "Initiative"
    );
    if let Some(handout) = &state.overlay {
        tracing::info!(handout_id = %handout.id, url = %handout.url, description = %handout.description, "Handout on display");
    }
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(server = %config.server_url, "Starting DM Screen player view");

    let view = Arc::new(PlayerView::new());
    let mut changes = view.subscribe();

    let adventures = AdventureClient::new(config.server_url.clone());
    view.set_adventure(adventures.load(&config.adventure_id).await);

    let client = SyncClient::new(config.ws_url(), config.backoff, view.clone());
    client.start().await;

    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = changes.borrow_and_update().clone();
                log_view(&state);
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    client.stop().await;
    Ok(())
}
