//! Infrastructure layer for colloquy
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod export;
pub mod generate;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig, FileExportConfig,
    FileGenerationConfig, FileSimulationConfig, GenerationBackend,
};
pub use export::{ExportedFiles, TranscriptWriter};
pub use generate::{HttpTextGenerator, ScriptedTextGenerator};
pub use logging::JsonlConversationLogger;
