//! Client-side error types.

use dmscreen_core::error::DomainError;
use thiserror::Error;

/// Failures of the sync connection.
///
/// These are recovered locally by reconnecting; they only become fatal once
/// the configured retry budget is exhausted.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The WebSocket handshake failed.
    #[error("connect failed: {0}")]
    Connect(#[from] tokio_tungstenite::tungstenite::Error),

    /// No connection is currently established.
    #[error("not connected")]
    NotConnected,

    /// The connection closed before the message was written to the socket.
    #[error("connection closed")]
    Closed,

    /// The event could not be serialized.
    #[error("failed to encode event: {0}")]
    Encode(DomainError),
}

/// Failures fetching the read-only adventure document.
#[derive(Debug, Error)]
pub enum DataFetchError {
    /// The request could not be sent or the body could not be read.
    #[error("adventure request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("adventure request returned status {0}")]
    Status(u16),
}

/// Startup errors for the player binary.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A configuration value is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Installing a signal handler failed.
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}
