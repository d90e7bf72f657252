//! Output formatting for finished dialogs.

pub mod console;

pub use console::ConsoleFormatter;
