//! Session domain model.

pub mod store;
