//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain types on
//! demand.

use colloquy_application::ports::text_generator::{DEFAULT_TEMPERATURE, GenerationParams};
use colloquy_domain::{ActionTable, AgentProfile, UnknownActionKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("agent name cannot be empty")]
    EmptyAgentName,

    #[error("agent '{0}' is listed more than once")]
    DuplicateAgentName(String),

    #[error("agent '{agent}': {source}")]
    UnknownAction {
        agent: String,
        #[source]
        source: UnknownActionKind,
    },

    #[error("agent '{agent}': probability {value} for '{action}' is outside 0.0..=1.0")]
    InvalidProbability {
        agent: String,
        action: String,
        value: f64,
    },

    #[error("agent '{agent}': topics cannot contain empty entries")]
    EmptyTopic { agent: String },

    #[error("unknown generation backend '{0}' (expected 'http' or 'scripted')")]
    UnknownBackend(String),
}

/// Which adapter produces the utterances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationBackend {
    /// OpenAI-compatible chat-completions endpoint.
    #[default]
    Http,
    /// Canned lines, cycled; no network.
    Scripted,
}

/// Raw simulation configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSimulationConfig {
    /// Upper bound on discussion rounds
    pub max_rounds: u32,
    /// Fixed RNG seed; omit for entropy-seeded runs
    pub seed: Option<u64>,
}

impl Default for FileSimulationConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            seed: None,
        }
    }
}

/// Raw generation configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Backend name: "http" or "scripted"
    pub backend: String,
    /// Chat-completions URL for the http backend
    pub endpoint: String,
    /// Model name passed through to the endpoint
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Whether to sample; `false` requests greedy decoding
    pub do_sample: bool,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            endpoint: "http://localhost:8080/v1/chat/completions".to_string(),
            model: "default".to_string(),
            temperature: DEFAULT_TEMPERATURE,
            do_sample: true,
        }
    }
}

impl FileGenerationConfig {
    /// Parse the backend string into the [`GenerationBackend`] enum
    pub fn parse_backend(&self) -> Result<GenerationBackend, ConfigValidationError> {
        match self.backend.to_lowercase().as_str() {
            "http" => Ok(GenerationBackend::Http),
            "scripted" => Ok(GenerationBackend::Scripted),
            other => Err(ConfigValidationError::UnknownBackend(other.to_string())),
        }
    }
}

/// Raw export configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExportConfig {
    /// Directory the transcript files are written to
    pub dir: PathBuf,
    /// File name prefix: `<prefix>_prompt.txt`, `<prefix>_history.xml`
    pub prefix: String,
}

impl Default for FileExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            prefix: "dialog".to_string(),
        }
    }
}

/// One entry of an agent's action table, in cascade order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileActionEntry {
    /// Action kind: "change", "support", "confirm", "reflect_end",
    /// "summary", "probe"
    pub kind: String,
    /// Firing probability in 0.0..=1.0
    pub probability: f64,
}

/// Raw agent configuration from TOML (`[[agents]]` entries)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Speaker name; must be unique across the roster
    pub name: String,
    /// Persona description embedded into every prompt
    pub role: String,
    /// Topic queue, offered in order
    pub topics: Vec<String>,
    /// Personal action table; entry order is the cascade order
    pub actions: Vec<FileActionEntry>,
    /// Action taken when an override is consumed with nothing to reflect
    pub fallback: String,
}

impl FileAgentConfig {
    /// Convert into a domain profile, validating as we go.
    pub fn to_profile(&self) -> Result<AgentProfile, ConfigValidationError> {
        if self.name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyAgentName);
        }
        if self.topics.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyTopic {
                agent: self.name.clone(),
            });
        }

        let mut table = ActionTable::new();
        for entry in &self.actions {
            let kind = entry
                .kind
                .parse()
                .map_err(|source| ConfigValidationError::UnknownAction {
                    agent: self.name.clone(),
                    source,
                })?;
            if !(0.0..=1.0).contains(&entry.probability) {
                return Err(ConfigValidationError::InvalidProbability {
                    agent: self.name.clone(),
                    action: entry.kind.clone(),
                    value: entry.probability,
                });
            }
            table = table.with(kind, entry.probability);
        }

        let mut profile = AgentProfile::new(
            self.name.clone(),
            self.role.clone(),
            self.topics.iter().cloned(),
        )
        .with_actions(table);
        if !self.fallback.trim().is_empty() {
            let fallback = self.fallback.parse().map_err(|source| {
                ConfigValidationError::UnknownAction {
                    agent: self.name.clone(),
                    source,
                }
            })?;
            profile = profile.with_fallback(fallback);
        }
        Ok(profile)
    }

    /// The built-in three-agent roster used when no config provides one.
    pub fn sample_roster() -> Vec<Self> {
        vec![
            Self {
                name: "Alice".to_string(),
                role: "Alice ist technische Expertin mit einer Leidenschaft für Innovation."
                    .to_string(),
                topics: vec![
                    "technology".to_string(),
                    "artificial intelligence".to_string(),
                    "robotics".to_string(),
                ],
                actions: vec![
                    FileActionEntry {
                        kind: "summary".to_string(),
                        probability: 0.1,
                    },
                    FileActionEntry {
                        kind: "probe".to_string(),
                        probability: 0.05,
                    },
                ],
                fallback: "support".to_string(),
            },
            Self {
                name: "Bob".to_string(),
                role: "Bob ist neugieriger Entdecker mit Abenteuergeist.".to_string(),
                topics: vec![
                    "cooking".to_string(),
                    "travel".to_string(),
                    "photography".to_string(),
                ],
                actions: vec![
                    FileActionEntry {
                        kind: "summary".to_string(),
                        probability: 0.05,
                    },
                    FileActionEntry {
                        kind: "probe".to_string(),
                        probability: 0.1,
                    },
                ],
                fallback: "support".to_string(),
            },
            Self {
                name: "Eve".to_string(),
                role: "Eve ist kreative Persönlichkeit mit Interesse an Kunst.".to_string(),
                topics: vec![
                    "music".to_string(),
                    "literature".to_string(),
                    "cinema".to_string(),
                ],
                actions: vec![
                    FileActionEntry {
                        kind: "summary".to_string(),
                        probability: 0.07,
                    },
                    FileActionEntry {
                        kind: "probe".to_string(),
                        probability: 0.08,
                    },
                ],
                fallback: "support".to_string(),
            },
        ]
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Simulation settings
    pub simulation: FileSimulationConfig,
    /// Generation backend settings
    pub generation: FileGenerationConfig,
    /// Transcript export settings
    pub export: FileExportConfig,
    /// The roster; a config that defines any `[[agents]]` replaces the
    /// built-in sample roster entirely
    pub agents: Vec<FileAgentConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            simulation: FileSimulationConfig::default(),
            generation: FileGenerationConfig::default(),
            export: FileExportConfig::default(),
            agents: FileAgentConfig::sample_roster(),
        }
    }
}

impl FileConfig {
    /// Build the validated roster in config order.
    pub fn roster(&self) -> Result<Vec<AgentProfile>, ConfigValidationError> {
        let mut seen = BTreeSet::new();
        let mut roster = Vec::with_capacity(self.agents.len());
        for agent in &self.agents {
            let profile = agent.to_profile()?;
            if !seen.insert(profile.id().clone()) {
                return Err(ConfigValidationError::DuplicateAgentName(
                    agent.name.clone(),
                ));
            }
            roster.push(profile);
        }
        Ok(roster)
    }

    /// Base sampling parameters from the `[generation]` section.
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams::default()
            .with_temperature(self.generation.temperature)
            .with_sampling(self.generation.do_sample)
    }
}
