//! Events command for inspecting event files.
//!
//! Lets a host pre-validate a feed before handing it to the correlator,
//! which rejects a whole run on the first malformed event.

use std::path::Path;

use anyhow::{Context, Result, bail};
use mmc_core::Event;

/// Parses and validates an events file, reporting each failure.
///
/// Returns an error (non-zero exit) if any event fails to parse or carries
/// unusable geometry.
pub fn check(path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read events file {}", path.display()))?;
    let raw: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("expected a JSON array of events in {}", path.display()))?;

    let mut failures = 0usize;
    for (index, value) in raw.iter().enumerate() {
        match serde_json::from_value::<Event>(value.clone()) {
            Ok(event) => {
                if let Err(err) = event.validate() {
                    failures += 1;
                    println!("event {index} ({}): {err}", event.id);
                }
            }
            Err(err) => {
                failures += 1;
                println!("event {index}: {err}");
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} event(s) failed validation", raw.len());
    }

    println!("{} event(s) OK", raw.len());
    Ok(())
}
