//! Presentation layer for colloquy
//!
//! This crate contains CLI definitions, output formatters,
//! and the live console reporter.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ConsoleReporter;
