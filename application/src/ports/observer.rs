//! Dialog observation port
//!
//! Defines the interface for live output during a dialog run.

use colloquy_domain::{ActionKind, SpeakerId};

/// Callback for live dialog events during a run
///
/// Implementations live in the presentation layer and can display
/// turns in various ways (console, web UI, etc.)
pub trait DialogObserver: Send + Sync {
    /// Called once with the generated scene description.
    fn on_scene(&self, text: &str);

    /// Called for each greeting in roster order, before round one.
    fn on_greeting(&self, speaker: &SpeakerId, text: &str);

    /// Called at the top of each discussion round.
    fn on_round_start(&self, round: u32);

    /// Called for each spoken turn with the action that produced it.
    fn on_turn(&self, speaker: &SpeakerId, action: ActionKind, text: &str);

    /// Called once after the final round.
    fn on_dialog_complete(&self, rounds_completed: u32);

    /// Called just before a generation call starts; the matching turn
    /// event follows once the reply is in.
    fn on_generation_start(&self, _speaker: &SpeakerId) {}
}

/// No-op observer for when live output is not needed
pub struct NoObserver;

impl DialogObserver for NoObserver {
    fn on_scene(&self, _text: &str) {}
    fn on_greeting(&self, _speaker: &SpeakerId, _text: &str) {}
    fn on_round_start(&self, _round: u32) {}
    fn on_turn(&self, _speaker: &SpeakerId, _action: ActionKind, _text: &str) {}
    fn on_dialog_complete(&self, _rounds_completed: u32) {}
}
