//! Correlation-type classification for event pairs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::event::MessengerType;

/// The messenger combination a correlated pair represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorrelationType {
    /// Gravitational wave paired with a gamma-ray burst.
    GwGrb,
    /// Gravitational wave paired with an optical transient.
    GwOptical,
    /// Gamma-ray burst paired with an optical transient.
    GrbOptical,
    /// All three of gravitational wave, gamma-ray burst, and optical
    /// transient implicated. Only meaningful for checks spanning more than
    /// two events; a strict pair always reduces to one of the two-way
    /// labels above, so the pair classifier never produces this.
    MultiMessenger,
    /// Same messenger on both sides, or a combination outside the table
    /// (e.g., neutrino or radio-burst pairs).
    SameType,
}

impl CorrelationType {
    /// String representation used on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GwGrb => "gw_grb",
            Self::GwOptical => "gw_optical",
            Self::GrbOptical => "grb_optical",
            Self::MultiMessenger => "multi_messenger",
            Self::SameType => "same_type",
        }
    }
}

impl fmt::Display for CorrelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrelationType {
    type Err = UnknownCorrelationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gw_grb" => Ok(Self::GwGrb),
            "gw_optical" => Ok(Self::GwOptical),
            "grb_optical" => Ok(Self::GrbOptical),
            "multi_messenger" => Ok(Self::MultiMessenger),
            "same_type" => Ok(Self::SameType),
            _ => Err(UnknownCorrelationType(s.to_string())),
        }
    }
}

impl Serialize for CorrelationType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CorrelationType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown correlation type strings.
#[derive(Debug, Clone)]
pub struct UnknownCorrelationType(String);

impl fmt::Display for UnknownCorrelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown correlation type: {}", self.0)
    }
}

impl std::error::Error for UnknownCorrelationType {}

/// Classifies a pair by the messenger channels involved.
///
/// The two types are ordered lexicographically by their wire strings, then
/// matched against a fixed decision table. Order of arguments never changes
/// the result.
#[must_use]
pub fn correlation_type(first: &MessengerType, second: &MessengerType) -> CorrelationType {
    use MessengerType::{GammaRayBurst, GravitationalWave, OpticalTransient};

    let (a, b) = if first.as_str() <= second.as_str() {
        (first, second)
    } else {
        (second, first)
    };

    match (a, b) {
        (GammaRayBurst, GravitationalWave) => CorrelationType::GwGrb,
        (GravitationalWave, OpticalTransient) => CorrelationType::GwOptical,
        (GammaRayBurst, OpticalTransient) => CorrelationType::GrbOptical,
        _ => CorrelationType::SameType,
    }
}
