//! Speaker identity.
//!
//! Every transcript turn is attributed to a [`SpeakerId`] — one of the
//! roster agents or the reserved narrator used for scene descriptions.

use serde::{Deserialize, Serialize};

/// Name of the reserved speaker that narrates the opening scene.
pub const NARRATOR: &str = "Narrator";

/// Identifier for anyone who can hold a turn in a dialog.
///
/// Speaker IDs are the display names of the roster agents; they are
/// compared verbatim, so "Alice" and "alice" are different speakers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeakerId(String);

impl SpeakerId {
    /// Creates a SpeakerId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The reserved narrator speaker for scene turns.
    pub fn narrator() -> Self {
        Self(NARRATOR.to_string())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for SpeakerId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
