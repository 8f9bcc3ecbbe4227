//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

/// Settings for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,
    /// Directory holding `<id>.json` adventure documents.
    pub adventure_dir: PathBuf,
    /// Session joined by clients connecting to `/ws`.
    pub default_session: String,
}

impl ServerConfig {
    /// Reads `HOST`, `PORT`, `ADVENTURE_DIR` and `DEFAULT_SESSION_ID`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value is invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;

        let adventure_dir =
            PathBuf::from(lookup("ADVENTURE_DIR").unwrap_or_else(|| "./adventures".to_string()));

        let default_session = lookup("DEFAULT_SESSION_ID").unwrap_or_else(|| "1".to_string());
        if default_session.trim().is_empty() {
            return Err(AppError::Config(
                "DEFAULT_SESSION_ID must not be empty".to_string(),
            ));
        }

        Ok(Self {
            addr,
            adventure_dir,
            default_session,
        })
    }
}
