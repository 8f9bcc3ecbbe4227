//! DM Screen — API error types.

use std::net::SocketAddr;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dmscreen_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Reasons the server fails to start or stops serving.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable holds a value the server cannot use.
    #[error("configuration error: {0}")]
    Config(String),

    /// The listen address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address from `HOST`/`PORT`.
        addr: SocketAddr,
        /// Underlying socket error.
        source: std::io::Error,
    },

    /// The accept loop ended with an I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body of every non-2xx HTTP response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable code, shared with `session:error` payloads.
    pub error: &'static str,
    /// Detail for logs and humans.
    pub message: String,
}

/// A domain failure on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    /// HTTP status for the wrapped failure.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0 {
            DomainError::AdventureNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.0.code(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
