//! Final result of a dialog run.

use crate::core::SpeakerId;
use crate::dialog::transcript::Transcript;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything a completed run produced.
///
/// `rounds_completed` counts discussion rounds that actually ran; a
/// run that ends early because every topic queue was exhausted reports
/// fewer rounds than the configured maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogOutcome {
    pub transcript: Transcript,
    pub rounds_completed: u32,
    pub end_signalers: BTreeSet<SpeakerId>,
}

impl DialogOutcome {
    /// Whether the group reached a consensus to end (anyone signaled).
    pub fn reached_end_consensus(&self) -> bool {
        !self.end_signalers.is_empty()
    }
}
