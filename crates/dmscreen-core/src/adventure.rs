//! Read-only adventure documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Static adventure content fetched once per client session.
///
/// Only `creatures` is interpreted; every other field is carried through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Adventure {
    /// Creatures available to the initiative tracker.
    #[serde(default)]
    pub creatures: Vec<Value>,
    /// Remaining document fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
