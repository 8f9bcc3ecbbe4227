//! Event router for one session.
//!
//! Inbound events are applied to the [`SessionStore`] and the resulting
//! state is broadcast to every connection of the session. Mutation and
//! fan-out happen under one lock, so two updates can never interleave and
//! every connection observes broadcasts in the order they were applied.

use std::collections::HashMap;

use dmscreen_core::error::DomainError;
use dmscreen_core::event::{ClientEvent, ErrorPayload, ServerEvent};
use dmscreen_core::handout::Handout;
use dmscreen_core::state::SessionState;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::store::SessionStore;

#[derive(Debug, Default)]
struct RouterState {
    store: SessionStore,
    connections: HashMap<Uuid, mpsc::Sender<ServerEvent>>,
}

impl RouterState {
    /// Queues `event` on every connection without waiting.
    ///
    /// A full queue only costs that client this message; a closed queue
    /// means the client is gone and it is dropped from the session.
    fn broadcast(&mut self, event: &ServerEvent) {
        self.connections
            .retain(|connection_id, sender| match sender.try_send(event.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    warn!(
                        connection_id = %connection_id,
                        event = event.name(),
                        "Dropping broadcast for slow connection"
                    );
                    true
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(connection_id = %connection_id, "Removing closed connection");
                    false
                }
            });
    }

    fn reply(&self, connection_id: Uuid, event: ServerEvent) {
        if let Some(sender) = self.connections.get(&connection_id) {
            if sender.try_send(event).is_err() {
                warn!(connection_id = %connection_id, "Failed to send reply, channel full or closed");
            }
        }
    }
}

/// Routes events for a single session.
#[derive(Debug)]
pub struct SessionRouter {
    session_id: String,
    state: Mutex<RouterState>,
}

impl SessionRouter {
    /// Creates a router with empty session state.
    #[must_use]
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            state: Mutex::new(RouterState::default()),
        }
    }

    /// Returns the session this router serves.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Registers a connection and queues the current snapshot to it.
    ///
    /// The snapshot is queued under the same lock as mutations, so the new
    /// connection sees it before any incremental event and misses none.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the snapshot cannot be queued;
    /// the connection is not registered in that case.
    #[instrument(skip(self, sender), fields(session_id = %self.session_id))]
    pub async fn connect(
        &self,
        connection_id: Uuid,
        sender: mpsc::Sender<ServerEvent>,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        let snapshot = ServerEvent::Snapshot(state.store.snapshot());
        if let Err(e) = sender.try_send(snapshot) {
            warn!(connection_id = %connection_id, "Failed to queue snapshot for new connection");
            return Err(DomainError::Infrastructure(format!(
                "snapshot could not be queued: {e}"
            )));
        }
        state.connections.insert(connection_id, sender);
        info!(connections = state.connections.len(), "Connection joined session");
        Ok(())
    }

    /// Removes a connection from the session.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn disconnect(&self, connection_id: Uuid) {
        let mut state = self.state.lock().await;
        if state.connections.remove(&connection_id).is_some() {
            info!(connections = state.connections.len(), "Connection left session");
        }
    }

    /// Decodes and handles one text frame from `connection_id`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the frame was rejected; the
    /// originator has already been told.
    pub async fn handle_frame(&self, connection_id: Uuid, text: &str) -> Result<(), DomainError> {
        match ClientEvent::decode(text) {
            Ok(event) => self.handle(connection_id, event).await,
            Err(err) => {
                warn!(session_id = %self.session_id, connection_id = %connection_id, error = %err, "Rejected frame");
                self.state
                    .lock()
                    .await
                    .reply(connection_id, ServerEvent::Error(ErrorPayload::from(&err)));
                Err(err)
            }
        }
    }

    /// Applies one event and broadcasts the resulting state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the event was rejected; the error
    /// is reported to `connection_id` only and state is unchanged.
    #[instrument(skip(self, event), fields(session_id = %self.session_id, event = event.name()))]
    pub async fn handle(&self, connection_id: Uuid, event: ClientEvent) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;

        let outcome = match event {
            ClientEvent::InitiativeUpdate(order) => state
                .store
                .apply_initiative_update(order)
                .map(ServerEvent::InitiativeReceive),
            ClientEvent::InitiativeAdvance => Ok(ServerEvent::InitiativeReceive(
                state.store.advance_initiative(),
            )),
            ClientEvent::HandoutShow(handout) => handout
                .as_ref()
                .map_or(Ok(()), Handout::validate)
                .map(|()| ServerEvent::HandoutReceiveShow(state.store.set_active_handout(handout))),
        };

        match outcome {
            Ok(broadcast) => {
                debug!(outbound = broadcast.name(), "Broadcasting state change");
                state.broadcast(&broadcast);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Rejected event");
                state.reply(connection_id, ServerEvent::Error(ErrorPayload::from(&err)));
                Err(err)
            }
        }
    }

    /// Returns the current session state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.store.snapshot()
    }

    /// Returns the number of registered connections.
    pub async fn connection_count(&self) -> usize {
        self.state.lock().await.connections.len()
    }
}
