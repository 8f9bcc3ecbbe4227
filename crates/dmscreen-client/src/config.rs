//! Player configuration read from the environment.

use crate::backoff::BackoffPolicy;
use crate::error::ClientError;

/// Settings for the headless player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// HTTP base URL of the sync server.
    pub server_url: String,
    /// Session to join; `None` joins the server's default session.
    pub session_id: Option<String>,
    /// Adventure document to load.
    pub adventure_id: String,
    /// Reconnect timing.
    pub backoff: BackoffPolicy,
}

impl ClientConfig {
    /// Reads `DMSCREEN_URL`, `DMSCREEN_SESSION`, `DMSCREEN_ADVENTURE` and
    /// `DMSCREEN_MAX_RETRIES`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if a value is invalid.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if a value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let server_url = lookup("DMSCREEN_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_owned();
        if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "DMSCREEN_URL must be an http(s) URL, got {server_url}"
            )));
        }

        let max_attempts = lookup("DMSCREEN_MAX_RETRIES")
            .map(|raw| {
                raw.parse::<u32>().map_err(|e| {
                    ClientError::Config(format!("DMSCREEN_MAX_RETRIES must be a valid u32: {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            server_url,
            session_id: lookup("DMSCREEN_SESSION").filter(|s| !s.is_empty()),
            adventure_id: lookup("DMSCREEN_ADVENTURE").unwrap_or_else(|| "1".to_string()),
            backoff: BackoffPolicy {
                max_attempts,
                ..BackoffPolicy::default()
            },
        })
    }

    /// WebSocket endpoint for the configured session.
    #[must_use]
    pub fn ws_url(&self) -> String {
        let base = self
            .server_url
            .replacen("https://", "wss://", 1)
            .replacen("http://", "ws://", 1);
        match &self.session_id {
            Some(session_id) => format!("{base}/sessions/{session_id}/ws"),
            None => format!("{base}/ws"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::ClientConfig;
    use crate::error::ClientError;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ClientConfig, ClientError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_target_local_server() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.server_url, "http://localhost:3000");
        assert_eq!(config.adventure_id, "1");
        assert_eq!(config.backoff.max_attempts, None);
        assert_eq!(config.ws_url(), "ws://localhost:3000/ws");
    }

    #[test]
    fn test_session_and_tls_map_to_wss_session_path() {
        let config = config_from(&[
            ("DMSCREEN_URL", "https://screen.example.com/"),
            ("DMSCREEN_SESSION", "table-4"),
        ])
        .unwrap();

        assert_eq!(
            config.ws_url(),
            "wss://screen.example.com/sessions/table-4/ws"
        );
    }

    #[test]
    fn test_invalid_max_retries_is_config_error() {
        let result = config_from(&[("DMSCREEN_MAX_RETRIES", "lots")]);

        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_non_http_url_is_config_error() {
        let result = config_from(&[("DMSCREEN_URL", "ftp://nope")]);

        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
