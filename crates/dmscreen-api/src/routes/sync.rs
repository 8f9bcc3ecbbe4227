//! WebSocket endpoint for the sync channel.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use axum::{Router, routing::get};
use dmscreen_core::event::ServerEvent;
use dmscreen_session::application::router::SessionRouter;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::state::AppState;

/// Buffer size for per-connection message channel.
const CONNECTION_CHANNEL_BUFFER: usize = 256;

/// GET /ws — joins the default session.
async fn default_session_ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let session = state.hub.session(&state.default_session).await;
    ws.on_upgrade(move |socket| handle_socket(socket, session))
}

/// GET /sessions/{session_id}/ws
async fn session_ws(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    let session = state.hub.session(&session_id).await;
    ws.on_upgrade(move |socket| handle_socket(socket, session))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, session: Arc<SessionRouter>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let connection_id = Uuid::new_v4();

    let (tx, mut rx) = mpsc::channel::<ServerEvent>(CONNECTION_CHANNEL_BUFFER);

    // Registering queues the snapshot ahead of any broadcast.
    if let Err(e) = session.connect(connection_id, tx).await {
        error!(connection_id = %connection_id, error = %e, "Rejecting WebSocket connection");
        let _ = ws_sender.send(Message::Close(None)).await;
        return;
    }

    info!(connection_id = %connection_id, session_id = session.session_id(), "WebSocket connection established");

    // Forward queued events to the socket in order.
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match event.encode() {
                Ok(text) => text,
                Err(e) => {
                    error!(connection_id = %connection_id, error = %e, "Failed to encode event");
                    continue;
                }
            };
            if ws_sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => {
                // Rejections are already reported to this connection.
                let _ = session.handle_frame(connection_id, text.as_str()).await;
            }
            Ok(Message::Close(_)) => {
                info!(connection_id = %connection_id, "WebSocket closed by client");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    session.disconnect(connection_id).await;
    send_task.abort();

    info!(connection_id = %connection_id, "WebSocket connection terminated");
}

/// Returns the router for the sync channel.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ws", get(default_session_ws))
        .route("/sessions/{session_id}/ws", get(session_ws))
}
