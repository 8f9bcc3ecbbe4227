//! Shared application state.

use std::sync::Arc;

use dmscreen_core::repository::AdventureRepository;
use dmscreen_session::application::hub::SessionHub;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Running sessions.
    pub hub: Arc<SessionHub>,
    /// Source of adventure documents.
    pub adventures: Arc<dyn AdventureRepository>,
    /// Session joined by `/ws`.
    pub default_session: Arc<str>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        hub: Arc<SessionHub>,
        adventures: Arc<dyn AdventureRepository>,
        default_session: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            hub,
            adventures,
            default_session: default_session.into(),
        }
    }
}
