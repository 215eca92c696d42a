//! CLI entrypoint for Astris
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use astris_application::DeliberationOrchestrator;
use astris_infrastructure::{ConfigError, ConfigLoader, Credentials, CouncilFactory, FileConfig};
use astris_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
    run_http_server,
};
use clap::Parser;
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let Some(command) = cli.command else {
        bail!("No command given. Use `astris serve` or `astris ask <QUESTION>`.");
    };

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).map_err(ConfigError::from)?
    };

    if !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    info!("Starting Astris v{}", env!("CARGO_PKG_VERSION"));

    // === Dependency Injection ===
    let orchestrator = build_council(&config)?;

    match command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            run_http_server(&host, port, Arc::new(orchestrator)).await?;
        }
        Command::Ask {
            question,
            output,
            quiet,
        } => {
            let format = output.unwrap_or_else(|| config.output.format.unwrap_or_default().into());
            ask(&orchestrator, &question, format, quiet).await?;
        }
    }

    Ok(())
}

/// Resolve credentials and assemble the council; any problem is fatal.
fn build_council(config: &FileConfig) -> Result<DeliberationOrchestrator, ConfigError> {
    let credentials = Credentials::from_env(&config.providers).map_err(ConfigError::Invalid)?;
    CouncilFactory::new(config, &credentials)?.build()
}

async fn ask(
    orchestrator: &DeliberationOrchestrator,
    question: &str,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    // Progress output would corrupt JSON on stdout
    let deliberation = if quiet || format == OutputFormat::Json {
        orchestrator.deliberate(question).await?
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        orchestrator
            .deliberate_with_progress(question, &progress)
            .await?
    } else {
        orchestrator
            .deliberate_with_progress(question, &SimpleProgress)
            .await?
    };

    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&deliberation),
        OutputFormat::Synthesis => ConsoleFormatter::format_synthesis_only(&deliberation),
        OutputFormat::Json => ConsoleFormatter::format_json(&deliberation),
    };

    println!("{}", output);

    Ok(())
}

/// Initialize logging based on verbosity level, unless `RUST_LOG` is set.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
