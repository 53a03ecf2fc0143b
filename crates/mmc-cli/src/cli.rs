//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mmc_core::ClusterAlgorithm;

/// Multi-messenger coincidence correlator.
///
/// Reads a file of normalized detection events and reports spatially and
/// temporally coincident pairs and the clusters they form.
#[derive(Debug, Parser)]
#[command(name = "mmc", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Correlate an events file and report pairs and clusters.
    Correlate {
        /// Path to a JSON file containing an array of events.
        events: PathBuf,

        /// Maximum detection-time difference in seconds.
        #[arg(long)]
        time_window: Option<f64>,

        /// Maximum angular separation in degrees.
        #[arg(long)]
        angular_threshold: Option<f64>,

        /// Discard pairs scoring below this floor.
        #[arg(long)]
        min_confidence: Option<f64>,

        /// Clustering strategy: single-pass or transitive.
        #[arg(long)]
        cluster_algorithm: Option<ClusterAlgorithm>,

        /// Output the full report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Inspect event files.
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },
}

/// Event file operations.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// Parse and validate an events file, reporting per-event failures.
    Check {
        /// Path to a JSON file containing an array of events.
        file: PathBuf,
    },
}
