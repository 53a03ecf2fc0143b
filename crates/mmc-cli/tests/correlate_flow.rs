//! End-to-end tests for the correlate flow.
//!
//! Drives the binary the way a host would: write an events file, run
//! `mmc correlate`, and inspect the emitted report.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn mmc_binary() -> String {
    env!("CARGO_BIN_EXE_mmc").to_string()
}

fn write_events(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("events.json");
    std::fs::write(&path, json).expect("failed to write events file");
    path
}

/// Runs the binary with a home isolated to the temp directory so no user
/// config leaks into the run.
fn run_mmc(temp: &Path, args: &[&str]) -> Output {
    Command::new(mmc_binary())
        .env("HOME", temp)
        .env("XDG_CONFIG_HOME", temp.join(".config"))
        .args(args)
        .output()
        .expect("failed to run mmc")
}

const CLOSE_PAIR: &str = r#"[
    {
        "id": "GW-1",
        "source": "LIGO",
        "messenger": "gravitational_wave",
        "ra_deg": 10.0,
        "dec_deg": 0.0,
        "detected_at": "2025-03-01T12:00:00Z"
    },
    {
        "id": "GRB-1",
        "source": "Fermi",
        "messenger": "gamma_ray_burst",
        "ra_deg": 10.0,
        "dec_deg": 0.5,
        "detected_at": "2025-03-01T12:01:00Z"
    }
]"#;

#[test]
fn correlate_reports_close_pair() {
    let temp = TempDir::new().unwrap();
    let events = write_events(temp.path(), CLOSE_PAIR);

    let output = run_mmc(
        temp.path(),
        &[
            "correlate",
            events.to_str().unwrap(),
            "--time-window",
            "600",
            "--angular-threshold",
            "1.0",
            "--json",
        ],
    );
    assert!(
        output.status.success(),
        "correlate should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be a JSON report");
    let correlations = report["correlations"].as_array().unwrap();
    assert_eq!(correlations.len(), 1);

    let pair = &correlations[0];
    assert_eq!(pair["correlation_type"], "gw_grb");
    assert!((pair["time_diff_seconds"].as_f64().unwrap() - 60.0).abs() < 1e-9);
    // 0.7 * (1 - 60/600) + 0.3 * (1 - 0.5/1.0) = 0.78
    assert!((pair["confidence_score"].as_f64().unwrap() - 0.78).abs() < 1e-6);

    let clusters = report["clusters"].as_array().unwrap();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0]["size"], 2);
}

#[test]
fn correlate_outside_window_reports_nothing() {
    let events_json = CLOSE_PAIR.replace("2025-03-01T12:01:00Z", "2025-03-01T12:11:40Z");
    let temp = TempDir::new().unwrap();
    let events = write_events(temp.path(), &events_json);

    // 700 seconds apart with a 600 second window
    let output = run_mmc(
        temp.path(),
        &[
            "correlate",
            events.to_str().unwrap(),
            "--time-window",
            "600",
            "--angular-threshold",
            "1.0",
            "--json",
        ],
    );
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["correlations"].as_array().unwrap().len(), 0);
    assert_eq!(report["clusters"].as_array().unwrap().len(), 0);
}

#[test]
fn correlate_accepts_transitive_algorithm_flag() {
    let temp = TempDir::new().unwrap();
    let events = write_events(temp.path(), CLOSE_PAIR);

    let output = run_mmc(
        temp.path(),
        &[
            "correlate",
            events.to_str().unwrap(),
            "--time-window",
            "600",
            "--angular-threshold",
            "1.0",
            "--cluster-algorithm",
            "transitive",
            "--json",
        ],
    );
    assert!(
        output.status.success(),
        "transitive algorithm should be accepted: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["clusters"].as_array().unwrap().len(), 1);
}

#[test]
fn correlate_rejects_non_positive_window() {
    let temp = TempDir::new().unwrap();
    let events = write_events(temp.path(), CLOSE_PAIR);

    let output = run_mmc(
        temp.path(),
        &[
            "correlate",
            events.to_str().unwrap(),
            "--time-window",
            "0",
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("time_window_seconds"),
        "stderr should name the offending parameter: {stderr}"
    );
}

#[test]
fn correlate_rejects_malformed_event() {
    let events_json = CLOSE_PAIR.replace("\"ra_deg\": 10.0", "\"ra_deg\": 500.0");
    let temp = TempDir::new().unwrap();
    let events = write_events(temp.path(), &events_json);

    let output = run_mmc(temp.path(), &["correlate", events.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("malformed event"),
        "stderr should report the malformed event: {stderr}"
    );
}

#[test]
fn events_check_accepts_valid_file() {
    let temp = TempDir::new().unwrap();
    let events = write_events(temp.path(), CLOSE_PAIR);

    let output = run_mmc(temp.path(), &["events", "check", events.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 event(s) OK"), "unexpected output: {stdout}");
}

#[test]
fn events_check_reports_invalid_events() {
    let events_json = CLOSE_PAIR.replace("\"dec_deg\": 0.5", "\"dec_deg\": -120.0");
    let temp = TempDir::new().unwrap();
    let events = write_events(temp.path(), &events_json);

    let output = run_mmc(temp.path(), &["events", "check", events.to_str().unwrap()]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("declination"),
        "per-event failure should be reported on stdout: {stdout}"
    );
}
