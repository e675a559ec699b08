//! Grocerbot - automated grocery ordering.
//!
//! Main entry point for the grocerbot CLI.

mod cli;
mod cmd_exec;
mod setup;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use grocerbot_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig, ValidationResult};
use grocerbot_shopper::ShoppingTrip;

use crate::cli::{Cli, Commands};

/// Initialize tracing with console and file output.
///
/// Log files are written under `logging.dir` with daily rotation.
fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let log_dir = PathBuf::from(ConfigLoader::expand_path(&config.dir));
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.file_prefix)
        .filename_suffix("log")
        .max_log_files(config.max_files)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer alive for the program duration
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    ConfigLoader::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

fn report_validation(result: &ValidationResult) {
    for warning in &result.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        error!("{}: {}", error.path, error.message);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("Failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    let result = match cli.command.unwrap_or(Commands::Trip) {
        Commands::Trip => run_trip(&config, cli.headed).await,
        Commands::Exec { file } => run_exec(&config, cli.headed, &file).await,
        Commands::CheckConfig => check_config(&config, &cli.config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run a full shopping trip.
async fn run_trip(config: &Config, headed: bool) -> anyhow::Result<()> {
    info!("Starting grocerbot v{}", env!("CARGO_PKG_VERSION"));

    let validation = ConfigValidator::validate(config);
    report_validation(&validation);
    if !validation.is_valid() {
        anyhow::bail!("Configuration has {} error(s)", validation.errors.len());
    }

    let shopper = setup::build_shopper(config, headed);
    let source = setup::build_source(&config.source);
    let notifier = setup::build_notifier(&config.email)?;

    let mut trip = ShoppingTrip::new(
        shopper,
        Box::new(source),
        notifier,
        setup::trip_settings(config),
    );
    let report = trip.run().await?;

    println!("{}", report.title);
    println!("Added {} of {} items", report.found(), report.results.len());
    println!("Cart: {}", report.cart_url);
    println!("Results: {}", report.sheet_url);
    Ok(())
}

/// Replay a command file against one browser session.
async fn run_exec(config: &Config, headed: bool, file: &Path) -> anyhow::Result<()> {
    let validation = ConfigValidator::validate(config);
    let blocking: Vec<_> = setup::blocking_errors(&validation, &["browser"]).collect();
    for error in &blocking {
        error!("{}: {}", error.path, error.message);
    }
    if !blocking.is_empty() {
        anyhow::bail!("Browser configuration has {} error(s)", blocking.len());
    }

    let commands = cmd_exec::load_commands(file)?;
    info!("Loaded {} command(s) from {}", commands.len(), file.display());

    let mut shopper = setup::build_shopper(config, headed);
    cmd_exec::run_commands(&mut shopper, commands).await
}

fn check_config(config: &Config, path: &Path) -> anyhow::Result<()> {
    let validation = ConfigValidator::validate(config);
    report_validation(&validation);
    if !validation.is_valid() {
        anyhow::bail!(
            "{}: {} error(s), {} warning(s)",
            path.display(),
            validation.errors.len(),
            validation.warnings.len()
        );
    }
    println!(
        "{}: OK ({} warning(s))",
        path.display(),
        validation.warnings.len()
    );
    Ok(())
}
