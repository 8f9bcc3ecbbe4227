//! WebSocket connection to the sync server.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use dmscreen_core::event::{ClientEvent, ServerEvent};

use crate::error::TransportError;

/// Buffer size for each direction of a connection.
const CONNECTION_CHANNEL_BUFFER: usize = 64;

/// Completed once the frame is written, or with `Closed` if it never will be.
type Ack = oneshot::Sender<Result<(), TransportError>>;

/// An encoded frame waiting for the socket.
#[derive(Debug)]
struct Outgoing {
    text: String,
    ack: Ack,
}

/// Cloneable handle for sending events over one connection.
#[derive(Debug, Clone)]
pub struct EventSender {
    outbound: mpsc::Sender<Outgoing>,
}

impl EventSender {
    /// Sends `event` and waits until it has been written to the socket.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Encode` if the event cannot be serialized and
    /// `TransportError::Closed` if the connection ends before the frame is
    /// written, including events still queued when it drops.
    pub async fn send(&self, event: ClientEvent) -> Result<(), TransportError> {
        let text = event.encode().map_err(TransportError::Encode)?;
        let (ack, written) = oneshot::channel();
        self.outbound
            .send(Outgoing { text, ack })
            .await
            .map_err(|_| TransportError::Closed)?;
        written.await.unwrap_or(Err(TransportError::Closed))
    }
}

/// One established connection.
///
/// Outbound events go through [`sender`](Self::sender); inbound events
/// arrive on the receiver returned by [`open`](Self::open) in the order the
/// server sent them. When the socket closes, the inbound receiver yields
/// `None` and every pending or later send fails with
/// [`TransportError::Closed`]. Dropping the connection tears the socket down.
#[derive(Debug)]
pub struct Connection {
    sender: EventSender,
    task: JoinHandle<()>,
}

impl Connection {
    /// Connects to `url` and starts pumping frames.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Connect` if the handshake fails.
    pub async fn open(url: &str) -> Result<(Self, mpsc::Receiver<ServerEvent>), TransportError> {
        let (stream, _) = connect_async(url).await?;
        info!(url, "Connected to sync server");

        let (mut write, mut read) = stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::channel::<Outgoing>(CONNECTION_CHANNEL_BUFFER);
        let (inbound_tx, inbound_rx) = mpsc::channel::<ServerEvent>(CONNECTION_CHANNEL_BUFFER);

        // Reads and writes share one task so that either side ending closes
        // both channels at once.
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    frame = read.next() => match frame {
                        Some(Ok(Message::Text(text))) => match ServerEvent::decode(&text) {
                            Ok(event) => {
                                if inbound_tx.send(event).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => warn!(error = %e, "Failed to parse server message"),
                        },
                        Some(Ok(Message::Close(_))) | None => {
                            info!("Server closed connection");
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            warn!(error = %e, "WebSocket error");
                            break;
                        }
                    },
                    outgoing = outbound_rx.recv() => match outgoing {
                        Some(Outgoing { text, ack }) => {
                            if let Err(e) = write.send(Message::Text(text.into())).await {
                                warn!(error = %e, "Failed to send message");
                                let _ = ack.send(Err(TransportError::Closed));
                                break;
                            }
                            let _ = ack.send(Ok(()));
                        }
                        None => {
                            let _ = write.close().await;
                            break;
                        }
                    },
                }
            }

            outbound_rx.close();
            let mut dropped = 0_usize;
            while let Ok(Outgoing { ack, .. }) = outbound_rx.try_recv() {
                let _ = ack.send(Err(TransportError::Closed));
                dropped += 1;
            }
            debug!(dropped, "Connection task finished");
        });

        Ok((
            Self {
                sender: EventSender {
                    outbound: outbound_tx,
                },
                task,
            },
            inbound_rx,
        ))
    }

    /// Returns a handle for sending events on this connection.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// Sends `event` and waits until it has been written.
    ///
    /// # Errors
    ///
    /// See [`EventSender::send`].
    pub async fn send(&self, event: ClientEvent) -> Result<(), TransportError> {
        self.sender.send(event).await
    }

    /// Returns whether the socket has shut down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.task.abort();
    }
}
