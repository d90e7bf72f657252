//! Core domain concepts shared across all subdomains.
//!
//! - [`speaker::SpeakerId`] — identity of a dialog participant

pub mod speaker;

pub use speaker::{NARRATOR, SpeakerId};
