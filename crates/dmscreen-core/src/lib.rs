//! DM Screen Core — shared domain types and wire protocol.
//!
//! This crate defines the state that is synchronized between the game-master
//! console and player displays, and the named events that carry it. It
//! contains no I/O.

pub mod adventure;
pub mod error;
pub mod event;
pub mod handout;
pub mod initiative;
pub mod repository;
pub mod state;
