//! Shared per-run session state.
//!
//! One [`SessionState`] value travels mutably through the scheduler and
//! the action selector. It carries the four pieces of state that couple
//! agents to each other: who owns the current topic, how much discussion
//! it has received, who has signaled to end, and whether a probe granted
//! someone the next turn.

use crate::core::SpeakerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Mutable dialog-wide state shared by all agents in one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    topic_initiator: Option<SpeakerId>,
    rounds_on_topic: u32,
    end_signalers: BTreeSet<SpeakerId>,
    pending_override: Option<SpeakerId>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The agent currently owning the topic, if any topic was claimed yet.
    pub fn topic_initiator(&self) -> Option<&SpeakerId> {
        self.topic_initiator.as_ref()
    }

    /// Claims topic ownership for `initiator` and resets the discussion
    /// counter.
    pub fn begin_topic(&mut self, initiator: SpeakerId) {
        self.topic_initiator = Some(initiator);
        self.rounds_on_topic = 0;
    }

    /// Discussion turns credited to the current topic.
    pub fn rounds_on_topic(&self) -> u32 {
        self.rounds_on_topic
    }

    /// Credits one discussion turn to the current topic.
    pub fn record_topic_round(&mut self) {
        self.rounds_on_topic += 1;
    }

    /// Records that `speaker` has signaled the wish to end.
    ///
    /// Re-recording the same speaker is a no-op, so scanning the same
    /// turn repeatedly cannot inflate the set.
    pub fn mark_end_signal(&mut self, speaker: SpeakerId) {
        self.end_signalers.insert(speaker);
    }

    pub fn has_end_signalers(&self) -> bool {
        !self.end_signalers.is_empty()
    }

    pub fn is_end_signaler(&self, speaker: &SpeakerId) -> bool {
        self.end_signalers.contains(speaker)
    }

    /// The set of agents that have signaled to end, in name order.
    pub fn end_signalers(&self) -> &BTreeSet<SpeakerId> {
        &self.end_signalers
    }

    /// Grants `target` the next turn exclusively.
    ///
    /// A later grant replaces an unconsumed earlier one; only a single
    /// override is ever pending.
    pub fn set_override(&mut self, target: SpeakerId) {
        self.pending_override = Some(target);
    }

    pub fn pending_override(&self) -> Option<&SpeakerId> {
        self.pending_override.as_ref()
    }

    /// Consumes the pending override, if any.
    pub fn take_override(&mut self) -> Option<SpeakerId> {
        self.pending_override.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> SpeakerId {
        SpeakerId::new(name)
    }

    #[test]
    fn test_fresh_session_is_empty() {
        let session = SessionState::new();
        assert_eq!(session.topic_initiator(), None);
        assert_eq!(session.rounds_on_topic(), 0);
        assert!(!session.has_end_signalers());
        assert_eq!(session.pending_override(), None);
    }

    #[test]
    fn test_begin_topic_resets_round_counter() {
        let mut session = SessionState::new();
        session.begin_topic(id("Alice"));
        session.record_topic_round();
        session.record_topic_round();
        assert_eq!(session.rounds_on_topic(), 2);

        session.begin_topic(id("Bob"));
        assert_eq!(session.topic_initiator(), Some(&id("Bob")));
        assert_eq!(session.rounds_on_topic(), 0);
    }

    #[test]
    fn test_end_signalers_grow_and_dedupe() {
        let mut session = SessionState::new();
        session.mark_end_signal(id("Alice"));
        session.mark_end_signal(id("Alice"));
        session.mark_end_signal(id("Bob"));
        assert_eq!(session.end_signalers().len(), 2);
        assert!(session.is_end_signaler(&id("Alice")));
        assert!(!session.is_end_signaler(&id("Eve")));
    }

    #[test]
    fn test_override_is_consumed_once() {
        let mut session = SessionState::new();
        session.set_override(id("Eve"));
        assert_eq!(session.pending_override(), Some(&id("Eve")));
        assert_eq!(session.take_override(), Some(id("Eve")));
        assert_eq!(session.take_override(), None);
    }

    #[test]
    fn test_later_override_replaces_earlier() {
        let mut session = SessionState::new();
        session.set_override(id("Bob"));
        session.set_override(id("Eve"));
        assert_eq!(session.take_override(), Some(id("Eve")));
    }

    #[test]
    fn test_end_signalers_iterate_in_name_order() {
        let mut session = SessionState::new();
        session.mark_end_signal(id("Eve"));
        session.mark_end_signal(id("Alice"));
        let names: Vec<&str> = session.end_signalers().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Eve"]);
    }
}
