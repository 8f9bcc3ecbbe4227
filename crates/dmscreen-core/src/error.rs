//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A mutation payload was malformed or internally inconsistent.
    #[error("validation error: {0}")]
    Validation(String),

    /// No adventure document exists for the requested id.
    #[error("adventure not found: {0}")]
    AdventureNotFound(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Machine-readable code reported alongside the message.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::AdventureNotFound(_) => "adventure_not_found",
            Self::Infrastructure(_) => "infrastructure_error",
        }
    }
}
