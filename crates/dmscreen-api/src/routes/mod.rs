//! Route modules.

pub mod adventure;
pub mod health;
pub mod sync;
