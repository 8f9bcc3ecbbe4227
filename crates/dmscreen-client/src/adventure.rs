//! Fetches the read-only adventure document.

use std::collections::HashMap;

use dmscreen_core::adventure::Adventure;
use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::error::DataFetchError;
use crate::view::AdventureState;

/// HTTP client for `GET /adventure/{id}`.
///
/// Successful responses are cached per adventure id for the lifetime of the
/// client; failures are not cached so a later call may retry.
#[derive(Debug)]
pub struct AdventureClient {
    http: reqwest::Client,
    base_url: String,
    cached: Mutex<HashMap<String, Adventure>>,
}

impl AdventureClient {
    /// Creates a client for the server at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            cached: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the adventure `adventure_id`, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Returns `DataFetchError` if the request fails or the server answers
    /// with a non-success status.
    pub async fn adventure(&self, adventure_id: &str) -> Result<Adventure, DataFetchError> {
        // Held across the fetch so concurrent callers share one request.
        let mut cached = self.cached.lock().await;
        if let Some(adventure) = cached.get(adventure_id) {
            return Ok(adventure.clone());
        }

        let adventure = self.fetch(adventure_id).await?;
        cached.insert(adventure_id.to_owned(), adventure.clone());
        Ok(adventure)
    }

    /// Fetches the adventure and reports the outcome as a display state.
    pub async fn load(&self, adventure_id: &str) -> AdventureState {
        match self.adventure(adventure_id).await {
            Ok(adventure) => AdventureState::Ready(adventure),
            Err(e) => AdventureState::Unavailable(e.to_string()),
        }
    }

    #[instrument(skip(self))]
    async fn fetch(&self, adventure_id: &str) -> Result<Adventure, DataFetchError> {
        let url = format!("{}/adventure/{adventure_id}", self.base_url);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataFetchError::Status(status.as_u16()));
        }

        let adventure = response.json::<Adventure>().await?;
        info!(creatures = adventure.creatures.len(), "Fetched adventure");
        Ok(adventure)
    }
}
