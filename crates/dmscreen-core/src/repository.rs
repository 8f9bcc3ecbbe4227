//! Adventure repository abstraction.

use async_trait::async_trait;

use crate::adventure::Adventure;
use crate::error::DomainError;

/// Read-only source of adventure documents.
#[async_trait]
pub trait AdventureRepository: Send + Sync {
    /// Load the adventure with the given id.
    ///
    /// Returns `DomainError::AdventureNotFound` when no document exists.
    async fn load_adventure(&self, adventure_id: &str) -> Result<Adventure, DomainError>;
}
