//! Handouts broadcast to the player display.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A displayable artifact shown in the player overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handout {
    /// Handout identifier.
    pub id: String,
    /// Image location.
    pub url: String,
    /// Alt text shown with the image.
    #[serde(default)]
    pub description: String,
}

impl Handout {
    /// Creates a new handout.
    #[must_use]
    pub fn new(id: impl Into<String>, url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            description: description.into(),
        }
    }

    /// Rejects handouts that cannot be displayed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `url` is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.url.trim().is_empty() {
            return Err(DomainError::Validation(format!(
                "handout {} has no url",
                self.id
            )));
        }
        Ok(())
    }
}

/// Whether a session is currently broadcasting a handout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoutDisplay {
    /// No active handout.
    Idle,
    /// A handout is on display.
    Displaying,
}

impl HandoutDisplay {
    /// Derives the display state from the active handout.
    #[must_use]
    pub fn of(handout: Option<&Handout>) -> Self {
        if handout.is_some() {
            Self::Displaying
        } else {
            Self::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_url() {
        let handout = Handout::new("map", "  ", "Dungeon map");

        assert!(matches!(handout.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_display_state_tracks_presence() {
        let handout = Handout::new("map", "/map.png", "Dungeon map");

        assert_eq!(HandoutDisplay::of(Some(&handout)), HandoutDisplay::Displaying);
        assert_eq!(HandoutDisplay::of(None), HandoutDisplay::Idle);
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let handout: Handout =
            serde_json::from_value(serde_json::json!({ "id": "h1", "url": "/h1.png" })).unwrap();

        assert_eq!(handout.description, "");
    }
}
