//! Session application services.

pub mod hub;
pub mod router;
