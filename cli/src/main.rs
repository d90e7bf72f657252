//! CLI entrypoint for Colloquy
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use colloquy_application::{
    ConversationLogger, NoConversationLogger, RunDialogError, RunDialogInput, RunDialogUseCase,
    TextGenerator,
};
use colloquy_domain::{DialogOutcome, DrawSource, StdRandom};
use colloquy_infrastructure::{
    ConfigLoader, GenerationBackend, HttpTextGenerator, JsonlConversationLogger,
    ScriptedTextGenerator, TranscriptWriter,
};
use colloquy_presentation::{Cli, ConsoleFormatter, ConsoleReporter, OutputFormat};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting Colloquy");

    // Load configuration, then let CLI flags override it
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?
    };

    let roster = config.roster()?;
    let max_rounds = cli.rounds.unwrap_or(config.simulation.max_rounds);
    let seed = cli.seed.or(config.simulation.seed);

    let input = RunDialogInput::new(roster.clone())
        .with_max_rounds(max_rounds)
        .with_params(config.generation_params());

    let mut rng = match seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::from_entropy(),
    };

    let logger: Arc<dyn ConversationLogger> = match &cli.log_file {
        Some(path) => match JsonlConversationLogger::new(path) {
            Some(l) => Arc::new(l),
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    // Print header
    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|              Colloquy - Round Table Dialog                 |");
        println!("+============================================================+");
        println!();
        println!(
            "Participants: {}",
            roster
                .iter()
                .map(|a| a.id().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Rounds: up to {}", max_rounds);
        println!();
    }

    // === Dependency Injection ===
    // Pick the generation backend
    let backend = if cli.offline {
        GenerationBackend::Scripted
    } else {
        config.generation.parse_backend()?
    };

    let result = match backend {
        GenerationBackend::Http => {
            let generator = Arc::new(
                HttpTextGenerator::new(
                    config.generation.endpoint.clone(),
                    config.generation.model.clone(),
                )?
                .with_api_key(std::env::var("COLLOQUY_API_KEY").ok()),
            );
            run_dialog(generator, logger, input, &mut rng, cli.quiet).await
        }
        GenerationBackend::Scripted => {
            let generator = Arc::new(ScriptedTextGenerator::default());
            run_dialog(generator, logger, input, &mut rng, cli.quiet).await
        }
    };

    let writer = if cli.no_export {
        None
    } else {
        let dir = cli
            .export_dir
            .clone()
            .unwrap_or_else(|| config.export.dir.clone());
        let prefix = cli.prefix.clone().unwrap_or_else(|| config.export.prefix.clone());
        Some(TranscriptWriter::new(dir, prefix))
    };

    match result {
        Ok(outcome) => {
            if let Some(writer) = &writer {
                writer
                    .write(&outcome.transcript)
                    .context("Failed to export transcript")?;
            }

            let output = match cli.output {
                OutputFormat::Plain => ConsoleFormatter::format_plain(&outcome),
                OutputFormat::Xml => ConsoleFormatter::format_xml(&outcome),
                OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
            };
            println!("{}", output);
            Ok(())
        }
        Err(err) => {
            // Keep what was spoken up to the failure point.
            if let Some(writer) = &writer
                && let Some(partial) = err.partial_transcript()
                && !partial.is_empty()
            {
                match writer.write(partial) {
                    Ok(files) => eprintln!(
                        "Partial transcript saved to {}",
                        files.prompt_path.display()
                    ),
                    Err(export_err) => {
                        warn!("Could not export partial transcript: {}", export_err);
                    }
                }
            }
            Err(err.into())
        }
    }
}

/// Run the dialog with or without live console output.
async fn run_dialog<G: TextGenerator + 'static>(
    generator: Arc<G>,
    logger: Arc<dyn ConversationLogger>,
    input: RunDialogInput,
    rng: &mut dyn DrawSource,
    quiet: bool,
) -> Result<DialogOutcome, RunDialogError> {
    let use_case = RunDialogUseCase::new(generator).with_conversation_logger(logger);
    if quiet {
        use_case.execute(input, rng).await
    } else {
        let reporter = ConsoleReporter::new();
        let result = use_case.execute_with_observer(input, rng, &reporter).await;
        reporter.finish();
        result
    }
}
