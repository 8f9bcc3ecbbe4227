//! Shared test mocks and fixtures for the DM screen sync engine.

mod fixtures;
mod repository;

pub use fixtures::{party_order, sample_adventure};
pub use repository::{
    EmptyAdventureRepository, FailingAdventureRepository, StaticAdventureRepository,
};
