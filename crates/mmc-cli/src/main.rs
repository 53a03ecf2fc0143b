use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mmc_cli::commands::{correlate, events};
use mmc_cli::{Cli, Commands, Config, EventsAction};
use mmc_core::CorrelationParams;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Correlate {
            events,
            time_window,
            angular_threshold,
            min_confidence,
            cluster_algorithm,
            json,
        }) => {
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");

            let params = CorrelationParams {
                time_window_seconds: time_window.unwrap_or(config.time_window_seconds),
                angular_threshold_deg: angular_threshold.unwrap_or(config.angular_threshold_deg),
                min_confidence_score: min_confidence.or(config.min_confidence_score),
            };
            let algorithm = cluster_algorithm.unwrap_or(config.cluster_algorithm);

            correlate::run(events, &params, algorithm, *json)?;
        }
        Some(Commands::Events { action }) => match action {
            EventsAction::Check { file } => events::check(file)?,
        },
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
