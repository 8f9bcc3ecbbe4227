//! DM Screen — client side of the sync channel.
//!
//! The [`adapter::SyncClient`] keeps a WebSocket connection to the server
//! and applies every broadcast to a [`adapter::ViewSink`]; the
//! [`view::PlayerView`] is the sink used by player displays.

pub mod adapter;
pub mod adventure;
pub mod backoff;
pub mod config;
pub mod error;
pub mod transport;
pub mod view;
