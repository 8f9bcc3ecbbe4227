//! Test repositories — mock `AdventureRepository` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use dmscreen_core::adventure::Adventure;
use dmscreen_core::error::DomainError;
use dmscreen_core::repository::AdventureRepository;

/// An adventure repository backed by a fixed map. Records every id it was
/// asked for.
#[derive(Debug, Default)]
pub struct StaticAdventureRepository {
    adventures: HashMap<String, Adventure>,
    requested: Mutex<Vec<String>>,
}

impl StaticAdventureRepository {
    /// Create a repository that serves `adventure` under `adventure_id`.
    #[must_use]
    pub fn with(adventure_id: &str, adventure: Adventure) -> Self {
        let mut adventures = HashMap::new();
        adventures.insert(adventure_id.to_owned(), adventure);
        Self {
            adventures,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Returns every id passed to `load_adventure`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested_ids(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdventureRepository for StaticAdventureRepository {
    async fn load_adventure(&self, adventure_id: &str) -> Result<Adventure, DomainError> {
        self.requested.lock().unwrap().push(adventure_id.to_owned());
        self.adventures
            .get(adventure_id)
            .cloned()
            .ok_or_else(|| DomainError::AdventureNotFound(adventure_id.to_owned()))
    }
}

/// An adventure repository that knows no adventures. Useful for testing
/// "not found" responses.
#[derive(Debug)]
pub struct EmptyAdventureRepository;

#[async_trait]
impl AdventureRepository for EmptyAdventureRepository {
    async fn load_adventure(&self, adventure_id: &str) -> Result<Adventure, DomainError> {
        Err(DomainError::AdventureNotFound(adventure_id.to_owned()))
    }
}

/// An adventure repository that always returns an infrastructure error.
/// Useful for testing error-handling paths.
#[derive(Debug)]
pub struct FailingAdventureRepository;

#[async_trait]
impl AdventureRepository for FailingAdventureRepository {
    async fn load_adventure(&self, _adventure_id: &str) -> Result<Adventure, DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }
}
