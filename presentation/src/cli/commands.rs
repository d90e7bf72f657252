//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output form for the finished dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain dialogue, one `speaker: text` line per turn
    Plain,
    /// Markup form with one `<sp>` element per turn
    Xml,
    /// Full outcome as JSON
    Json,
}

/// CLI arguments for colloquy
#[derive(Parser, Debug)]
#[command(name = "colloquy")]
#[command(author, version, about = "Multi-agent dialog simulator - agents discuss, probe, and wind down on their own")]
#[command(long_about = r#"
Colloquy simulates a round-table conversation between configured agents.

A run has three stages:
1. Scene: a narrator sets the stage for the given participants
2. Greetings: every agent says hello, in roster order
3. Rounds: agents pick actions (new topic, support, probe, ...) until
   their topic queues run dry, they agree to stop, or the round limit hits

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./colloquy.toml     Project-level config
3. ~/.config/colloquy/config.toml   Global config

Example:
  colloquy
  colloquy --rounds 6 --seed 42 --output xml
  colloquy --offline --no-export
"#)]
pub struct Cli {
    /// Upper bound on discussion rounds (overrides config)
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Fixed RNG seed for reproducible runs (overrides config)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Use the offline scripted backend instead of the configured one
    #[arg(long)]
    pub offline: bool,

    /// Output format for the finished dialogue
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Directory for exported transcript files (overrides config)
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// File name prefix for exported transcript files (overrides config)
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Skip writing transcript files
    #[arg(long)]
    pub no_export: bool,

    /// Write dialog events to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress live turn output; print only the final dialogue
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_defaults() {
        let cli = Cli::try_parse_from(["colloquy"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Plain);
        assert!(cli.rounds.is_none());
        assert!(!cli.offline);
        assert!(!cli.no_export);
    }

    #[test]
    fn test_cli_parses_run_options() {
        let cli = Cli::try_parse_from([
            "colloquy", "-r", "6", "--seed", "42", "--output", "xml", "--offline", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.rounds, Some(6));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.output, OutputFormat::Xml);
        assert!(cli.offline);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_rejects_unknown_output_format() {
        assert!(Cli::try_parse_from(["colloquy", "--output", "yaml"]).is_err());
    }
}
