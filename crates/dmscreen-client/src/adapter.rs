//! Sync client adapter.
//!
//! Keeps one connection to the server alive and applies every inbound event
//! to a [`ViewSink`]. Each connection gets a fresh inbound channel; when the
//! socket drops the channel closes, consumption ends, and after reconnecting
//! the new channel is consumed the same way.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use dmscreen_core::event::{ClientEvent, ErrorPayload, ServerEvent};
use dmscreen_core::handout::Handout;
use dmscreen_core::initiative::InitiativeOrder;
use dmscreen_core::state::SessionState;

use crate::backoff::{BackoffPolicy, BackoffState};
use crate::error::TransportError;
use crate::transport::{Connection, EventSender};

/// Lifecycle of the adapter's connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not started, or stopped on request.
    Disconnected,
    /// Handshake in progress.
    Connecting,
    /// Receiving events.
    Connected,
    /// Waiting to retry after a failure.
    Reconnecting,
    /// Retry budget exhausted.
    Failed,
}

/// Setters the adapter drives. Implementations own the local view state.
pub trait ViewSink: Send + Sync {
    /// Replaces the local initiative order.
    fn set_initiative(&self, order: InitiativeOrder);

    /// Shows a handout, or closes the overlay on `None`.
    fn set_handout(&self, handout: Option<Handout>);

    /// Replaces all synchronized state at once.
    fn apply_snapshot(&self, state: SessionState) {
        self.set_initiative(state.initiative);
        self.set_handout(state.handout);
    }

    /// Called when the connection state changes.
    fn set_connection_state(&self, _state: ConnectionState) {}

    /// Called when the server rejects an event this client sent.
    fn report_error(&self, error: ErrorPayload) {
        warn!(code = %error.code, message = %error.message, "Server rejected event");
    }
}

/// Applies one server event to `sink`.
pub fn apply_event(sink: &dyn ViewSink, event: ServerEvent) {
    match event {
        ServerEvent::InitiativeReceive(order) => sink.set_initiative(order),
        ServerEvent::HandoutReceiveShow(handout) => sink.set_handout(handout),
        ServerEvent::Snapshot(state) => sink.apply_snapshot(state),
        ServerEvent::Error(error) => sink.report_error(error),
    }
}

struct Shared {
    url: String,
    policy: BackoffPolicy,
    sink: Arc<dyn ViewSink>,
    outbound: Mutex<Option<EventSender>>,
    state: watch::Sender<ConnectionState>,
}

impl Shared {
    fn set_state(&self, state: ConnectionState) {
        self.state.send_replace(state);
        self.sink.set_connection_state(state);
    }
}

/// Client half of the sync channel.
pub struct SyncClient {
    shared: Arc<Shared>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SyncClient {
    /// Creates a client for the WebSocket endpoint at `url`.
    ///
    /// Nothing connects until [`start`](Self::start).
    pub fn new(url: impl Into<String>, policy: BackoffPolicy, sink: Arc<dyn ViewSink>) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            shared: Arc::new(Shared {
                url: url.into(),
                policy,
                sink,
                outbound: Mutex::new(None),
                state,
            }),
            task: Mutex::new(None),
        }
    }

    /// Opens the connection in the background.
    ///
    /// Calling `start` while the client is already running does nothing, so
    /// there is never more than one connection per client.
    pub async fn start(&self) {
        let mut task = self.task.lock().await;
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            debug!(url = %self.shared.url, "Sync client already running");
            return;
        }
        *task = Some(tokio::spawn(run(Arc::clone(&self.shared))));
    }

    /// Disconnects and stops reconnecting.
    pub async fn stop(&self) {
        if let Some(handle) = self.task.lock().await.take() {
            handle.abort();
        }
        self.shared.outbound.lock().await.take();
        self.shared.set_state(ConnectionState::Disconnected);
    }

    /// Sends a mutation to the server and waits until it is on the wire.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::NotConnected` when no connection is up and
    /// `TransportError::Closed` when it dropped before the event was written.
    pub async fn send(&self, event: ClientEvent) -> Result<(), TransportError> {
        // Clone the sender to avoid holding the lock across await
        let sender = self.shared.outbound.lock().await.clone();
        let Some(sender) = sender else {
            return Err(TransportError::NotConnected);
        };
        sender.send(event).await
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        *self.shared.state.borrow()
    }

    /// Watches connection state changes.
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.shared.state.subscribe()
    }
}

impl Drop for SyncClient {
    fn drop(&mut self) {
        if let Some(handle) = self.task.get_mut().take() {
            handle.abort();
        }
    }
}

async fn run(shared: Arc<Shared>) {
    let mut backoff = BackoffState::new(shared.policy);

    loop {
        shared.set_state(ConnectionState::Connecting);

        match Connection::open(&shared.url).await {
            Ok((connection, mut inbound)) => {
                backoff.reset();
                *shared.outbound.lock().await = Some(connection.sender());
                shared.set_state(ConnectionState::Connected);

                while let Some(event) = inbound.recv().await {
                    debug!(event = event.name(), "Applying server event");
                    apply_event(shared.sink.as_ref(), event);
                }

                shared.outbound.lock().await.take();
                info!(url = %shared.url, "Connection lost");
            }
            Err(e) => warn!(url = %shared.url, error = %e, "Failed to connect"),
        }

        let Some(delay) = backoff.next_delay_and_advance() else {
            warn!(url = %shared.url, "Max reconnection attempts reached, giving up");
            shared.set_state(ConnectionState::Failed);
            return;
        };
        shared.set_state(ConnectionState::Reconnecting);
        info!(attempt = backoff.attempts(), delay_ms = delay.as_millis(), "Reconnecting");
        tokio::time::sleep(delay).await;
    }
}
