//! Conversational actions and per-agent action tables.
//!
//! An agent's turn always resolves to exactly one [`ActionKind`] (or to
//! silence). The set of actions is closed: configuration referring to an
//! unknown action name fails at parse time instead of surfacing as a
//! skipped turn mid-simulation.

use crate::random::DrawSource;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an action name that is not in the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action kind '{0}'")]
pub struct UnknownActionKind(pub String);

/// The closed set of conversational actions an agent can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Claim topic ownership and introduce the agent's next queued topic
    /// (or wind the conversation down once the queue is exhausted).
    ChangeTopic,
    /// Contribute a short supportive remark to the current topic.
    Support,
    /// Answer a question directly.
    Confirm,
    /// Acknowledge that others want to end and reflect on closing.
    ReflectEnd,
    /// Summarize the conversation and ask the group to commit.
    Summary,
    /// Ask one other participant a direct question, granting them the
    /// next turn exclusively.
    Probe,
}

impl ActionKind {
    /// Returns the wire/config name of the action.
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::ChangeTopic => "change",
            ActionKind::Support => "support",
            ActionKind::Confirm => "confirm",
            ActionKind::ReflectEnd => "reflect_end",
            ActionKind::Summary => "summary",
            ActionKind::Probe => "probe",
        }
    }

    /// All actions, in a stable documentation order.
    pub fn all() -> [ActionKind; 6] {
        [
            ActionKind::ChangeTopic,
            ActionKind::Support,
            ActionKind::Confirm,
            ActionKind::ReflectEnd,
            ActionKind::Summary,
            ActionKind::Probe,
        ]
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = UnknownActionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "change" => Ok(ActionKind::ChangeTopic),
            "support" => Ok(ActionKind::Support),
            "confirm" => Ok(ActionKind::Confirm),
            "reflect_end" => Ok(ActionKind::ReflectEnd),
            "summary" => Ok(ActionKind::Summary),
            "probe" => Ok(ActionKind::Probe),
            other => Err(UnknownActionKind(other.to_string())),
        }
    }
}

impl Serialize for ActionKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActionKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Ordered table of `(action, probability)` entries for one agent.
///
/// Sampling walks the entries in declaration order and fires the first
/// one whose independent draw lands below its probability, so earlier
/// entries shadow later ones. Order is part of an agent's persona, not
/// an implementation detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionTable(Vec<(ActionKind, f64)>);

impl ActionTable {
    /// Creates an empty table (the agent has no special actions).
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a table from ordered `(action, probability)` entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (ActionKind, f64)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Appends an entry, keeping declaration order.
    pub fn with(mut self, action: ActionKind, probability: f64) -> Self {
        self.0.push((action, probability));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (ActionKind, f64)> + '_ {
        self.0.iter().copied()
    }

    /// Samples the table: one draw per entry, first hit wins.
    ///
    /// Returns `None` when no entry fires (or the table is empty).
    pub fn sample(&self, rng: &mut dyn DrawSource) -> Option<ActionKind> {
        for (action, probability) in &self.0 {
            if rng.draw() < *probability {
                return Some(*action);
            }
        }
        None
    }
}
