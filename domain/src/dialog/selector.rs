//! Per-turn action selection.
//!
//! [`decide_action`] is the rule cascade every agent runs when its turn
//! comes around. The rules are strictly ordered; the first one that
//! applies wins:
//!
//! 1. scan the latest turn for end keywords (side effect only),
//! 2. honor a pending speaker override — consume it if it names this
//!    agent, otherwise stay silent,
//! 3. roll the agent's ordered special-action table,
//! 4. bow to consensus pressure (`reflect_end`) when others signaled,
//! 5. answer an open question (`confirm`),
//! 6. fall back to topic-state defaults, with weighted choices once a
//!    topic is owned.
//!
//! The selector mutates only the shared [`SessionState`] handed to it;
//! the transcript is read-only here.

use crate::core::SpeakerId;
use crate::dialog::action::ActionKind;
use crate::dialog::agent::AgentProfile;
use crate::dialog::session::SessionState;
use crate::dialog::transcript::{Transcript, Turn};
use crate::random::{DrawSource, weighted_choice};

/// Substrings that count as a wish to end the conversation.
///
/// Matched case-insensitively anywhere in a turn, tuned to the German
/// sample personas. "abschließen" only matches text spelled with ß;
/// lowercasing never produces the ß form from uppercase input.
pub const END_KEYWORDS: [&str; 4] = ["schluss", "ende", "abschließen", "beenden"];

/// Scans the latest turn for end keywords and records its speaker as an
/// end signaler.
///
/// Every agent runs this scan on the same turn before deciding, so the
/// signal is picked up no matter whose turn follows; the signaler set
/// dedupes repeats.
pub fn scan_for_end_signal(last: Option<&Turn>, session: &mut SessionState) {
    let Some(turn) = last else {
        return;
    };
    let lowered = turn.text.to_lowercase();
    if END_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        session.mark_end_signal(turn.speaker.clone());
    }
}

/// Decides what `agent` does this turn, or `None` to stay silent.
///
/// Silence only occurs while an override grants the turn to somebody
/// else. Draw consumption is deterministic: one draw per special-table
/// entry up to the first hit, plus at most one draw for a weighted
/// topic default — override and pressure rules consume none.
pub fn decide_action(
    agent: &AgentProfile,
    transcript: &Transcript,
    session: &mut SessionState,
    rng: &mut dyn DrawSource,
) -> Option<ActionKind> {
    scan_for_end_signal(transcript.last(), session);

    if let Some(target) = session.pending_override().cloned() {
        if target != *agent.id() {
            return None;
        }
        session.take_override();
        if reflects_on_end(agent.id(), session) {
            return Some(ActionKind::ReflectEnd);
        }
        return Some(agent.fallback());
    }

    if let Some(action) = agent.actions().sample(rng) {
        return Some(action);
    }

    if reflects_on_end(agent.id(), session) {
        return Some(ActionKind::ReflectEnd);
    }

    if transcript.last().is_some_and(Turn::is_question) {
        return Some(ActionKind::Confirm);
    }

    let Some(initiator) = session.topic_initiator() else {
        return Some(ActionKind::ChangeTopic);
    };

    let action = if session.rounds_on_topic() == 0 {
        if initiator != agent.id() {
            ActionKind::Support
        } else {
            weighted_choice(
                rng,
                &[ActionKind::Support, ActionKind::Confirm],
                &[0.7, 0.3],
            )
        }
    } else if session.rounds_on_topic() >= 2 {
        weighted_choice(
            rng,
            &[ActionKind::ChangeTopic, ActionKind::Support],
            &[0.6, 0.4],
        )
    } else {
        weighted_choice(
            rng,
            &[ActionKind::ChangeTopic, ActionKind::Support],
            &[0.4, 0.6],
        )
    };
    Some(action)
}

/// An agent reflects on ending when others have signaled but it has not.
fn reflects_on_end(agent: &SpeakerId, session: &SessionState) -> bool {
    session.has_end_signalers() && !session.is_end_signaler(agent)
}
