//! Prompt domain
//!
//! Templates for every generated turn: scene setting, greetings and the
//! per-action reply prompts.

mod template;

pub use template::DialogPrompts;
