//! Player-facing view model.
//!
//! Computes what the player display shows: the active and on-deck
//! participants, the handout overlay, and whether there is anything to show
//! at all. Rendering is left to the caller.

use dmscreen_core::adventure::Adventure;
use dmscreen_core::handout::Handout;
use dmscreen_core::initiative::{InitiativeItem, InitiativeOrder};
use dmscreen_core::state::SessionState;
use tokio::sync::watch;

use crate::adapter::{ConnectionState, ViewSink};

/// Loading state of the adventure document.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AdventureState {
    /// The fetch has not completed.
    #[default]
    Loading,
    /// The document is available.
    Ready(Adventure),
    /// The fetch failed; the display shows nothing.
    Unavailable(String),
}

/// Everything the player display needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerViewState {
    /// Local copy of the initiative order.
    pub initiative: InitiativeOrder,
    /// Handout shown in the overlay, if open.
    pub overlay: Option<Handout>,
    /// Adventure document load state.
    pub adventure: AdventureState,
    /// Connection to the sync server.
    pub connection: ConnectionState,
}

impl Default for PlayerViewState {
    fn default() -> Self {
        Self {
            initiative: InitiativeOrder::default(),
            overlay: None,
            adventure: AdventureState::default(),
            connection: ConnectionState::Disconnected,
        }
    }
}

impl PlayerViewState {
    /// The participant whose turn it is ("Playing").
    #[must_use]
    pub fn current_player(&self) -> Option<&InitiativeItem> {
        self.initiative.current_player()
    }

    /// The participant after the current one ("On Deck").
    #[must_use]
    pub fn next_player(&self) -> Option<&InitiativeItem> {
        self.initiative.next_player()
    }

    /// The adventure, once loaded.
    #[must_use]
    pub fn adventure(&self) -> Option<&Adventure> {
        match &self.adventure {
            AdventureState::Ready(adventure) => Some(adventure),
            AdventureState::Loading | AdventureState::Unavailable(_) => None,
        }
    }

    /// Whether the display renders anything.
    ///
    /// Nothing is shown while the adventure loads or when it could not be
    /// fetched; that is a quiet state, not an error page.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.adventure().is_some()
    }
}

/// Observable player view fed by the sync adapter.
#[derive(Debug)]
pub struct PlayerView {
    state: watch::Sender<PlayerViewState>,
}

impl Default for PlayerView {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerView {
    /// Creates an empty view.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(PlayerViewState::default());
        Self { state }
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> PlayerViewState {
        self.state.borrow().clone()
    }

    /// Watches for state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PlayerViewState> {
        self.state.subscribe()
    }

    /// Records the outcome of the adventure fetch.
    pub fn set_adventure(&self, adventure: AdventureState) {
        self.state.send_modify(|state| state.adventure = adventure);
    }

    /// Dismisses the overlay locally, as the player's close button does.
    ///
    /// The server still considers the handout active; the next broadcast
    /// reopens it.
    pub fn close_overlay(&self) {
        self.state.send_if_modified(|state| state.overlay.take().is_some());
    }
}

impl ViewSink for PlayerView {
    fn set_initiative(&self, order: InitiativeOrder) {
        self.state.send_modify(|state| state.initiative = order);
    }

    fn set_handout(&self, handout: Option<Handout>) {
        self.state.send_modify(|state| state.overlay = handout);
    }

    fn apply_snapshot(&self, snapshot: SessionState) {
        self.state.send_modify(|state| {
            state.initiative = snapshot.initiative;
            state.overlay = snapshot.handout;
        });
    }

    fn set_connection_state(&self, connection: ConnectionState) {
        self.state.send_modify(|state| state.connection = connection);
    }
}
