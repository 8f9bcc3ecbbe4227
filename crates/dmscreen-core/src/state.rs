//! Full synchronized state of one session.

use serde::{Deserialize, Serialize};

use crate::handout::{Handout, HandoutDisplay};
use crate::initiative::InitiativeOrder;

/// Everything a newly joined client needs to converge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current turn order.
    pub initiative: InitiativeOrder,
    /// Handout on display, if any.
    pub handout: Option<Handout>,
}

impl SessionState {
    /// Returns whether a handout is on display.
    #[must_use]
    pub fn display(&self) -> HandoutDisplay {
        HandoutDisplay::of(self.handout.as_ref())
    }
}
