//! Transcript persistence.

mod writer;

pub use writer::{ExportedFiles, TranscriptWriter};
