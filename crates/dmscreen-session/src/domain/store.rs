//! Canonical in-memory state for one session.

use dmscreen_core::error::DomainError;
use dmscreen_core::handout::{Handout, HandoutDisplay};
use dmscreen_core::initiative::InitiativeOrder;
use dmscreen_core::state::SessionState;

/// Holds the authoritative initiative order and active handout.
///
/// The store only mutates state; fan-out to clients is the router's job.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: SessionState,
}

impl SessionStore {
    /// Creates an empty store: no participants, no handout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored order wholesale and returns its normalized copy.
    ///
    /// Orders with duplicate ids or a `currentId` that matches no item are
    /// rejected and the stored order is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the order is inconsistent.
    pub fn apply_initiative_update(
        &mut self,
        order: InitiativeOrder,
    ) -> Result<InitiativeOrder, DomainError> {
        let normalized = order.normalized()?;
        self.state.initiative = normalized.clone();
        Ok(normalized)
    }

    /// Passes the turn to the next player and returns the new order.
    pub fn advance_initiative(&mut self) -> InitiativeOrder {
        self.state.initiative.advance();
        self.state.initiative.clone()
    }

    /// Replaces the active handout; `None` clears the display.
    pub fn set_active_handout(&mut self, handout: Option<Handout>) -> Option<Handout> {
        self.state.handout = handout;
        self.state.handout.clone()
    }

    /// Returns the full current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    /// Returns whether a handout is on display.
    #[must_use]
    pub fn display(&self) -> HandoutDisplay {
        self.state.display()
    }
}
