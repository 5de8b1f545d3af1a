//! Player identity as handed to the game core.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque player identifier, stable across reconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "index")]
    pub id: PlayerId,
    #[serde(rename = "name")]
    pub display_name: String,
}

impl Player {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(),
            display_name: display_name.into(),
        }
    }
}
