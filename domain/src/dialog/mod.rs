//! Dialog subdomain: the turn-taking model.
//!
//! - [`action`] — the closed action set and per-agent action tables
//! - [`agent`] — participant personas with topic queues
//! - [`session`] — shared per-run state (topic ownership, end signals,
//!   speaker overrides)
//! - [`transcript`] — the append-only record of turns and its renderings
//! - [`selector`] — the ordered rule cascade deciding each turn
//! - [`cleanup`] — normalization of raw generated replies
//! - [`outcome`] — the final result of a run

pub mod action;
pub mod agent;
pub mod cleanup;
pub mod outcome;
pub mod selector;
pub mod session;
pub mod transcript;

pub use action::{ActionKind, ActionTable, UnknownActionKind};
pub use agent::AgentProfile;
pub use cleanup::clean_reply;
pub use outcome::DialogOutcome;
pub use selector::{END_KEYWORDS, decide_action, scan_for_end_signal};
pub use session::SessionState;
pub use transcript::{Transcript, Turn};
