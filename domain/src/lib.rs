//! Domain layer for colloquy
//!
//! This crate contains the dialog model: personas, actions, session
//! state, the action-selection rules and the transcript. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Turn-taking
//!
//! A dialog run is a sequence of rounds over a fixed roster. Each turn,
//! an agent picks one conversational action through an ordered rule
//! cascade ([`dialog::selector`]) driven by shared [`dialog::SessionState`]:
//! pending speaker overrides, special-action tables, consensus pressure,
//! question pressure and topic-state defaults, in that priority order.
//!
//! ## Topics and consensus
//!
//! Agents own topics: a `change` action claims ownership and advances
//! the owner's topic queue. End-of-conversation is a consensus protocol:
//! keyword-bearing turns mark their speaker as an end signaler, and
//! non-signalers respond with `reflect_end` until everyone has had the
//! chance to weigh in.
//!
//! ## Determinism
//!
//! All randomness flows through [`random::DrawSource`] with a fixed
//! draw-consumption contract, so seeded or scripted sources replay a
//! run decision for decision.

pub mod core;
pub mod dialog;
pub mod prompt;
pub mod random;
pub mod util;

// Re-export commonly used types
pub use core::{NARRATOR, SpeakerId};
pub use dialog::{
    ActionKind, ActionTable, AgentProfile, DialogOutcome, END_KEYWORDS, SessionState, Transcript,
    Turn, UnknownActionKind, clean_reply, decide_action, scan_for_end_signal,
};
pub use prompt::DialogPrompts;
pub use random::{DrawSource, SequenceDraws, StdRandom, weighted_choice};
pub use util::preview;
