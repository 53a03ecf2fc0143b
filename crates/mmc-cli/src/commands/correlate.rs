//! Correlate command: run the engine over an events file.

use std::path::Path;

use anyhow::{Context, Result};
use mmc_core::{Cluster, ClusterAlgorithm, CorrelationParams, Event, EventPair};
use serde::Serialize;

/// Full report for a correlation run.
///
/// Mirrors the shape the surrounding system exposes to its own consumers:
/// pairs sorted by confidence descending, plus the clusters derived from
/// them.
#[derive(Debug, Serialize)]
pub struct CorrelationReport {
    pub correlations: Vec<EventPair>,
    pub clusters: Vec<Cluster>,
}

/// Runs the correlate command.
pub fn run(
    events_path: &Path,
    params: &CorrelationParams,
    algorithm: ClusterAlgorithm,
    json: bool,
) -> Result<()> {
    let events = load_events(events_path)?;
    tracing::debug!(count = events.len(), "loaded events");

    let correlations = mmc_core::correlate(&events, params)?;
    let clusters = mmc_core::find_clusters_with(&correlations, algorithm);

    let report = CorrelationReport {
        correlations,
        clusters,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

/// Reads and parses a JSON array of normalized events.
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read events file {}", path.display()))?;
    let events: Vec<Event> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse events file {}", path.display()))?;
    Ok(events)
}

fn print_summary(report: &CorrelationReport) {
    println!("{} correlated pair(s)", report.correlations.len());
    for pair in &report.correlations {
        println!(
            "  {} <-> {}  type={}  dt={:.1}s  sep={:.3}deg  confidence={:.3}",
            pair.event1.id,
            pair.event2.id,
            pair.correlation_type,
            pair.time_diff_seconds,
            pair.angular_separation_deg,
            pair.confidence_score
        );
    }

    println!("{} cluster(s)", report.clusters.len());
    for cluster in &report.clusters {
        let ids: Vec<&str> = cluster.events.iter().map(|e| e.id.as_str()).collect();
        println!(
            "  [{}] {} events: {}",
            cluster.id,
            cluster.size,
            ids.join(", ")
        );
    }
}
