//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use mmc_core::{ClusterAlgorithm, CorrelationParams};
use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// Carries the default correlation parameters applied when the command line
/// does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default maximum detection-time difference, in seconds.
    pub time_window_seconds: f64,

    /// Default maximum angular separation, in degrees.
    pub angular_threshold_deg: f64,

    /// Default confidence floor, if any.
    pub min_confidence_score: Option<f64>,

    /// Default clustering strategy.
    pub cluster_algorithm: ClusterAlgorithm,
}

impl Default for Config {
    fn default() -> Self {
        let params = CorrelationParams::default();
        Self {
            time_window_seconds: params.time_window_seconds,
            angular_threshold_deg: params.angular_threshold_deg,
            min_confidence_score: params.min_confidence_score,
            cluster_algorithm: ClusterAlgorithm::default(),
        }
    }
}

impl Config {
    /// Returns the correlation parameters this configuration describes.
    #[must_use]
    pub const fn params(&self) -> CorrelationParams {
        CorrelationParams {
            time_window_seconds: self.time_window_seconds,
            angular_threshold_deg: self.angular_threshold_deg,
            min_confidence_score: self.min_confidence_score,
        }
    }

    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (MMC_*)
        figment = figment.merge(Env::prefixed("MMC_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for mmc.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mmc"))
}
