//! Canned domain values used across test suites.

use dmscreen_core::adventure::Adventure;
use dmscreen_core::initiative::{InitiativeItem, InitiativeOrder, ItemId};

/// Aria, Borin and Cade in that order, Borin acting in round 1.
#[must_use]
pub fn party_order() -> InitiativeOrder {
    InitiativeOrder {
        current_id: Some(ItemId::Number(2)),
        items: vec![
            InitiativeItem::new(1, "Aria"),
            InitiativeItem::new(2, "Borin"),
            InitiativeItem::new(3, "Cade"),
        ],
        round: 1,
    }
}

/// A small adventure with two creatures and one extra field.
#[must_use]
pub fn sample_adventure() -> Adventure {
    serde_json::from_value(serde_json::json!({
        "name": "Goblin Ambush",
        "creatures": [
            { "name": "Goblin", "hp": 7 },
            { "name": "Wolf", "hp": 11 }
        ]
    }))
    .unwrap()
}
