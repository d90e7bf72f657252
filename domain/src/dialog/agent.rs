//! Agent persona.
//!
//! An [`AgentProfile`] is everything the engine knows about one
//! participant: identity, a role description woven into prompts, an
//! ordered queue of topics it wants to raise, its special-action table
//! and the fallback it uses when called upon by a probe.

use crate::core::SpeakerId;
use crate::dialog::action::{ActionKind, ActionTable};
use serde::{Deserialize, Serialize};

/// A dialog participant's persona and per-run topic cursor.
///
/// Profiles are mutable entities: the topic cursor advances as the
/// agent claims topics over the course of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    id: SpeakerId,
    role: String,
    topics: Vec<String>,
    topic_cursor: usize,
    actions: ActionTable,
    fallback: ActionKind,
}

impl AgentProfile {
    /// Creates a profile with an empty action table and a `support`
    /// fallback.
    pub fn new(
        id: impl Into<SpeakerId>,
        role: impl Into<String>,
        topics: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            topics: topics.into_iter().collect(),
            topic_cursor: 0,
            actions: ActionTable::new(),
            fallback: ActionKind::Support,
        }
    }

    /// Sets the ordered special-action table.
    pub fn with_actions(mut self, actions: ActionTable) -> Self {
        self.actions = actions;
        self
    }

    /// Sets the action used when a probe grants this agent the turn.
    pub fn with_fallback(mut self, fallback: ActionKind) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn id(&self) -> &SpeakerId {
        &self.id
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    pub fn fallback(&self) -> ActionKind {
        self.fallback
    }

    /// The topic under the cursor, if the queue is not exhausted.
    pub fn current_topic(&self) -> Option<&str> {
        self.topics.get(self.topic_cursor).map(String::as_str)
    }

    /// Whether this agent still has a topic to offer.
    pub fn has_remaining_topic(&self) -> bool {
        self.current_topic().is_some()
    }

    /// Advances the topic cursor by one.
    ///
    /// The cursor moves unconditionally, also past the end of the
    /// queue, and never moves backwards. Note the claim order: a topic
    /// change advances first and then reads [`Self::current_topic`],
    /// so the head of the queue is consumed by the agent's first
    /// change without being announced.
    pub fn advance_topic(&mut self) {
        self.topic_cursor += 1;
    }

    /// Current position of the topic cursor.
    pub fn topic_cursor(&self) -> usize {
        self.topic_cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(topics: &[&str]) -> AgentProfile {
        AgentProfile::new(
            "Alice",
            "Alice ist technische Expertin.",
            topics.iter().map(|t| t.to_string()),
        )
    }

    #[test]
    fn test_new_profile_defaults() {
        let agent = profile(&["a", "b"]);
        assert_eq!(agent.id().as_str(), "Alice");
        assert_eq!(agent.role(), "Alice ist technische Expertin.");
        assert!(agent.actions().is_empty());
        assert_eq!(agent.fallback(), ActionKind::Support);
        assert_eq!(agent.topic_cursor(), 0);
    }

    #[test]
    fn test_current_topic_follows_cursor() {
        let mut agent = profile(&["rust", "jazz"]);
        assert_eq!(agent.current_topic(), Some("rust"));
        agent.advance_topic();
        assert_eq!(agent.current_topic(), Some("jazz"));
        agent.advance_topic();
        assert_eq!(agent.current_topic(), None);
        assert!(!agent.has_remaining_topic());
    }

    #[test]
    fn test_cursor_is_monotonic_past_the_end() {
        let mut agent = profile(&["only"]);
        agent.advance_topic();
        agent.advance_topic();
        agent.advance_topic();
        assert_eq!(agent.topic_cursor(), 3);
        assert_eq!(agent.current_topic(), None);
    }

    #[test]
    fn test_empty_queue_has_no_topic() {
        let agent = profile(&[]);
        assert_eq!(agent.current_topic(), None);
        assert!(!agent.has_remaining_topic());
    }

    #[test]
    fn test_builders_set_actions_and_fallback() {
        let agent = profile(&["a"])
            .with_actions(ActionTable::new().with(ActionKind::Summary, 0.1))
            .with_fallback(ActionKind::Confirm);
        assert_eq!(agent.actions().len(), 1);
        assert_eq!(agent.fallback(), ActionKind::Confirm);
    }
}
