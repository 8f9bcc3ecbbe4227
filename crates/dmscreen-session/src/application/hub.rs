//! Registry of running sessions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use super::router::SessionRouter;

/// Maps session ids to their routers.
///
/// Sessions are created on first use and live for the rest of the process.
#[derive(Debug, Default)]
pub struct SessionHub {
    sessions: RwLock<HashMap<String, Arc<SessionRouter>>>,
}

impl SessionHub {
    /// Creates an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the router for `session_id`, creating it if needed.
    pub async fn session(&self, session_id: &str) -> Arc<SessionRouter> {
        if let Some(router) = self.sessions.read().await.get(session_id) {
            return Arc::clone(router);
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(sessions.entry(session_id.to_owned()).or_insert_with(|| {
            info!(session_id, "Opening session");
            Arc::new(SessionRouter::new(session_id))
        }))
    }

    /// Returns the router for `session_id` if it has been opened.
    pub async fn get(&self, session_id: &str) -> Option<Arc<SessionRouter>> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// Returns the number of open sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns whether no session has been opened.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
