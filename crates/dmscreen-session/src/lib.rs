//! DM Screen — Session bounded context.
//!
//! Owns the authoritative initiative order and handout display for each
//! running session and fans mutations out to every connected client.

pub mod application;
pub mod domain;
