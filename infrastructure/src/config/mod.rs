//! Configuration file loading for colloquy
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./colloquy.toml` or `./.colloquy.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/colloquy/config.toml`
//! 4. Fallback: `~/.config/colloquy/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileActionEntry, FileAgentConfig, FileConfig, FileExportConfig,
    FileGenerationConfig, FileSimulationConfig, GenerationBackend,
};
pub use loader::ConfigLoader;
