//! Normalized detection events from heterogeneous observatories.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Confidence, EventId, ValidationError};

/// The messenger channel a detection arrived on.
///
/// The known channels form a closed set; anything else is preserved as
/// [`MessengerType::Other`] so the engine never hard-fails on a feed that
/// reports a type it does not recognize.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessengerType {
    GravitationalWave,
    GammaRayBurst,
    OpticalTransient,
    Neutrino,
    RadioBurst,
    /// An unrecognized messenger string, kept verbatim.
    Other(String),
}

impl MessengerType {
    /// String representation used on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::GravitationalWave => "gravitational_wave",
            Self::GammaRayBurst => "gamma_ray_burst",
            Self::OpticalTransient => "optical_transient",
            Self::Neutrino => "neutrino",
            Self::RadioBurst => "radio_burst",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for MessengerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for MessengerType {
    fn from(s: &str) -> Self {
        match s {
            "gravitational_wave" => Self::GravitationalWave,
            "gamma_ray_burst" => Self::GammaRayBurst,
            "optical_transient" => Self::OpticalTransient,
            "neutrino" => Self::Neutrino,
            "radio_burst" => Self::RadioBurst,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for MessengerType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Serialize for MessengerType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MessengerType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}

/// A normalized astrophysical detection.
///
/// Events are supplied by an external collaborator and are immutable from
/// the engine's perspective: the correlator reads them and copies them into
/// its results, never mutating the caller's list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for this detection.
    pub id: EventId,
    /// Name of the reporting source or observatory (e.g., "LIGO", "Fermi").
    pub source: String,
    /// The messenger channel this detection arrived on.
    pub messenger: MessengerType,
    /// Right ascension in degrees. Feeds are expected to supply \[0, 360\].
    pub ra_deg: f64,
    /// Declination in degrees. Feeds are expected to supply \[-90, 90\].
    pub dec_deg: f64,
    /// UTC detection time.
    pub detected_at: DateTime<Utc>,
    /// Optional detection quality reported by the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_confidence: Option<Confidence>,
    /// Optional additional context as JSON, opaque to the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Event {
    /// Checks that the event carries usable geometry.
    ///
    /// The correlator rejects the whole run on the first failure rather
    /// than computing distances from unusable coordinates. Unparseable
    /// timestamps never reach this point; chrono rejects them during
    /// deserialization.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("ra_deg", self.ra_deg), ("dec_deg", self.dec_deg)] {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteCoordinate { field, value });
            }
        }
        if !(0.0..=360.0).contains(&self.ra_deg) {
            return Err(ValidationError::RightAscensionOutOfRange { value: self.ra_deg });
        }
        if !(-90.0..=90.0).contains(&self.dec_deg) {
            return Err(ValidationError::DeclinationOutOfRange { value: self.dec_deg });
        }
        Ok(())
    }
}
