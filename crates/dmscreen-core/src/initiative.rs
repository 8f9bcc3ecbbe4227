//! Initiative order: who acts, in what sequence, across rounds.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Image shown for a participant that has no `imageSrc` of its own.
pub const DEFAULT_IMAGE_SRC: &str = "/d20.jpg";

/// Identifier of an initiative participant.
///
/// Game-master consoles send either numeric or string ids; both are kept
/// verbatim so that a round trip through the server is lossless.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    /// A numeric id, e.g. `1`.
    Number(i64),
    /// A string id, e.g. `"goblin-2"`.
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// One participant in turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeItem {
    /// Stable identifier.
    pub id: ItemId,
    /// Display label.
    pub name: String,
    /// Optional portrait; absent means the caller shows [`DEFAULT_IMAGE_SRC`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
}

impl InitiativeItem {
    /// Creates an item without an image.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_src: None,
        }
    }

    /// Returns the image to display, substituting the placeholder.
    #[must_use]
    pub fn image_or_default(&self) -> &str {
        self.image_src.as_deref().unwrap_or(DEFAULT_IMAGE_SRC)
    }
}

/// Turn order for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeOrder {
    /// Id of the item whose turn is active, if any.
    pub current_id: Option<ItemId>,
    /// Participants in turn sequence.
    pub items: Vec<InitiativeItem>,
    /// Count of full cycles through `items`.
    #[serde(default)]
    pub round: u32,
}

impl InitiativeOrder {
    /// Checks that ids are unique and `current_id` resolves to an item.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` describing the first inconsistency.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(&item.id) {
                return Err(DomainError::Validation(format!(
                    "duplicate initiative id: {}",
                    item.id
                )));
            }
        }

        if let Some(current_id) = &self.current_id {
            if !seen.contains(current_id) {
                return Err(DomainError::Validation(format!(
                    "currentId {current_id} does not match any initiative item"
                )));
            }
        }

        Ok(())
    }

    /// Validates the order and returns its normalized form.
    ///
    /// Blank `imageSrc` values are cleared so that every consumer applies
    /// the same placeholder.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if [`validate`](Self::validate) fails.
    pub fn normalized(mut self) -> Result<Self, DomainError> {
        self.validate()?;
        for item in &mut self.items {
            if item
                .image_src
                .as_deref()
                .is_some_and(|src| src.trim().is_empty())
            {
                item.image_src = None;
            }
        }
        Ok(self)
    }

    fn position_of_current(&self) -> Option<usize> {
        let current_id = self.current_id.as_ref()?;
        self.items.iter().position(|item| &item.id == current_id)
    }

    /// Returns the item whose turn is active.
    #[must_use]
    pub fn current_player(&self) -> Option<&InitiativeItem> {
        self.position_of_current().map(|index| &self.items[index])
    }

    /// Returns the item after the current one, wrapping to the first.
    ///
    /// `None` when there is no current item or it matches nothing in
    /// `items`; lookup on a dangling id is a caller error, not a panic.
    #[must_use]
    pub fn next_player(&self) -> Option<&InitiativeItem> {
        let index = self.position_of_current()?;
        self.items.get((index + 1) % self.items.len())
    }

    /// Passes the turn to the next player.
    ///
    /// Wrapping from the last item to the first increments `round`. With no
    /// resolvable current item the turn starts at the first item. An empty
    /// order is left untouched.
    pub fn advance(&mut self) {
        let Some(first) = self.items.first() else {
            return;
        };

        match self.position_of_current() {
            Some(index) if index + 1 < self.items.len() => {
                self.current_id = Some(self.items[index + 1].id.clone());
            }
            Some(_) => {
                self.current_id = Some(first.id.clone());
                self.round = self.round.saturating_add(1);
            }
            None => {
                self.current_id = Some(first.id.clone());
                self.round = self.round.max(1);
            }
        }
    }
}
