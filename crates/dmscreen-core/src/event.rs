//! Named events exchanged over the sync channel.
//!
//! Every frame is a JSON object `{"event": "<name>", "data": <payload>}`.
//! Inbound and outbound catalogs are separate enums so that each side
//! handles its events exhaustively.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::handout::Handout;
use crate::initiative::InitiativeOrder;
use crate::state::SessionState;

/// Event name for [`ClientEvent::InitiativeUpdate`].
pub const INITIATIVE_UPDATE: &str = "initiative:update";

/// Event name for [`ClientEvent::InitiativeAdvance`].
pub const INITIATIVE_ADVANCE: &str = "initiative:advance";

/// Event name for [`ClientEvent::HandoutShow`].
pub const HANDOUT_SHOW: &str = "handout:show";

/// Event name for [`ServerEvent::InitiativeReceive`].
pub const INITIATIVE_RECEIVE: &str = "initiative:receive";

/// Event name for [`ServerEvent::HandoutReceiveShow`].
pub const HANDOUT_RECEIVE_SHOW: &str = "handout:receive-show";

/// Event name for [`ServerEvent::Snapshot`].
pub const SESSION_SNAPSHOT: &str = "session:snapshot";

/// Event name for [`ServerEvent::Error`].
pub const SESSION_ERROR: &str = "session:error";

/// Mutation requests sent by the game-master console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Replace the initiative order wholesale.
    #[serde(rename = "initiative:update")]
    InitiativeUpdate(InitiativeOrder),
    /// Pass the turn to the next player.
    #[serde(rename = "initiative:advance")]
    InitiativeAdvance,
    /// Show a handout, or clear the overlay with `null`.
    #[serde(rename = "handout:show")]
    HandoutShow(Option<Handout>),
}

impl ClientEvent {
    /// Returns the wire name of this event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitiativeUpdate(_) => INITIATIVE_UPDATE,
            Self::InitiativeAdvance => INITIATIVE_ADVANCE,
            Self::HandoutShow(_) => HANDOUT_SHOW,
        }
    }

    /// Parses a text frame.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for unknown events and payloads that
    /// do not match the event's schema.
    pub fn decode(text: &str) -> Result<Self, DomainError> {
        serde_json::from_str(text)
            .map_err(|e| DomainError::Validation(format!("malformed event: {e}")))
    }

    /// Encodes this event as a text frame.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if serialization fails.
    pub fn encode(&self) -> Result<String, DomainError> {
        serde_json::to_string(self)
            .map_err(|e| DomainError::Infrastructure(format!("event serialization failed: {e}")))
    }
}

/// Error report delivered to the originating connection only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl From<&DomainError> for ErrorPayload {
    fn from(err: &DomainError) -> Self {
        Self {
            code: err.code().to_owned(),
            message: err.to_string(),
        }
    }
}

/// State broadcasts and replies sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// The normalized initiative order after a mutation.
    #[serde(rename = "initiative:receive")]
    InitiativeReceive(InitiativeOrder),
    /// The active handout, or `null` when the overlay is closed.
    #[serde(rename = "handout:receive-show")]
    HandoutReceiveShow(Option<Handout>),
    /// Full state for a newly joined connection.
    #[serde(rename = "session:snapshot")]
    Snapshot(SessionState),
    /// A rejected mutation.
    #[serde(rename = "session:error")]
    Error(ErrorPayload),
}

impl ServerEvent {
    /// Returns the wire name of this event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InitiativeReceive(_) => INITIATIVE_RECEIVE,
            Self::HandoutReceiveShow(_) => HANDOUT_RECEIVE_SHOW,
            Self::Snapshot(_) => SESSION_SNAPSHOT,
            Self::Error(_) => SESSION_ERROR,
        }
    }

    /// Parses a text frame.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the frame is not a known event.
    pub fn decode(text: &str) -> Result<Self, DomainError> {
        serde_json::from_str(text)
            .map_err(|e| DomainError::Validation(format!("malformed event: {e}")))
    }

    /// Encodes this event as a text frame.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if serialization fails.
    pub fn encode(&self) -> Result<String, DomainError> {
        serde_json::to_string(self)
            .map_err(|e| DomainError::Infrastructure(format!("event serialization failed: {e}")))
    }
}
