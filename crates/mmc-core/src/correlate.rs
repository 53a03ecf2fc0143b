//! Pairwise correlation engine.
//!
//! Enumerates every unordered pair of input events, applies the caller's
//! windowing thresholds, scores and classifies the qualifying pairs, and
//! returns them sorted by confidence. Pure over its inputs: no I/O, no
//! shared state, safe to invoke from any scheduling context.
//!
//! # Algorithm
//!
//! 1. Validate parameters, then every input event (fail-fast on the first
//!    malformed one)
//! 2. For every pair (i, j) with i < j: compute time difference and angular
//!    separation, gate on both thresholds, score, apply the optional
//!    confidence floor, classify
//! 3. Stable-sort the qualifying pairs by confidence descending
//!
//! Enumeration is O(n²) with no spatial indexing. Input sizes are expected
//! in the hundreds, not millions; that ceiling is accepted and documented
//! rather than engineered around.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::{CorrelationType, correlation_type};
use crate::event::Event;
use crate::geometry::angular_separation;
use crate::scoring::confidence_score;
use crate::temporal::time_difference;
use crate::types::ValidationError;

/// Errors from a correlation run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CorrelateError {
    /// A windowing parameter was non-positive or NaN.
    #[error("invalid correlation parameter {parameter}: expected a positive number, got {value}")]
    InvalidParameters { parameter: &'static str, value: f64 },

    /// An input event carried unusable geometry. The whole run is rejected.
    #[error("malformed event {event_id}: {source}")]
    MalformedEvent {
        event_id: String,
        #[source]
        source: ValidationError,
    },
}

/// Caller-supplied windowing parameters for a correlation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationParams {
    /// Maximum absolute detection-time difference, in seconds. Must be
    /// positive.
    pub time_window_seconds: f64,

    /// Maximum angular separation, in degrees. Must be positive.
    pub angular_threshold_deg: f64,

    /// Optional confidence floor; qualifying pairs scoring below it are
    /// discarded. No floor means every qualifying pair is kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_confidence_score: Option<f64>,
}

impl Default for CorrelationParams {
    fn default() -> Self {
        Self {
            time_window_seconds: 3600.0, // 1 hour
            angular_threshold_deg: 5.0,
            min_confidence_score: None,
        }
    }
}

impl CorrelationParams {
    /// Checks that both windows are positive and nothing is NaN.
    ///
    /// Rejecting zero here is what keeps [`confidence_score`] free of
    /// division by zero.
    pub fn validate(&self) -> Result<(), CorrelateError> {
        require_positive("time_window_seconds", self.time_window_seconds)?;
        require_positive("angular_threshold_deg", self.angular_threshold_deg)?;
        if let Some(floor) = self.min_confidence_score {
            if floor.is_nan() {
                return Err(CorrelateError::InvalidParameters {
                    parameter: "min_confidence_score",
                    value: floor,
                });
            }
        }
        Ok(())
    }
}

fn require_positive(parameter: &'static str, value: f64) -> Result<(), CorrelateError> {
    if value.is_nan() || value <= 0.0 {
        return Err(CorrelateError::InvalidParameters { parameter, value });
    }
    Ok(())
}

/// A qualifying correlated pair.
///
/// Holds copies of its constituent events; the caller's input list is never
/// mutated. Immutable once produced and gone when the caller drops it; the
/// engine keeps nothing between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPair {
    /// The earlier-indexed event of the pair.
    pub event1: Event,

    /// The later-indexed event of the pair.
    pub event2: Event,

    /// Absolute detection-time difference in seconds. Always >= 0.
    pub time_diff_seconds: f64,

    /// Great-circle separation in degrees. Always within \[0, 180\].
    pub angular_separation_deg: f64,

    /// The messenger combination this pair represents.
    pub correlation_type: CorrelationType,

    /// Combined spatiotemporal confidence in \[0, 1\].
    pub confidence_score: f64,
}

/// Correlates a set of events under the given parameters.
///
/// Returns the qualifying pairs sorted by confidence descending; ties keep
/// their enumeration order, so identical inputs always produce identically
/// ordered output. Fewer than two events is not an error: there is nothing
/// to correlate, and the result is an empty list.
///
/// # Errors
///
/// [`CorrelateError::InvalidParameters`] if a window parameter is
/// non-positive or NaN; [`CorrelateError::MalformedEvent`] if any event
/// fails [`Event::validate`].
pub fn correlate(
    events: &[Event],
    params: &CorrelationParams,
) -> Result<Vec<EventPair>, CorrelateError> {
    params.validate()?;

    for event in events {
        event
            .validate()
            .map_err(|source| CorrelateError::MalformedEvent {
                event_id: event.id.to_string(),
                source,
            })?;
    }

    if events.len() < 2 {
        return Ok(Vec::new());
    }

    let mut pairs = Vec::new();

    for (i, event1) in events.iter().enumerate() {
        for event2 in &events[i + 1..] {
            // Duplicate identifiers never form a pair.
            if event1.id == event2.id {
                continue;
            }

            let time_diff = time_difference(event1.detected_at, event2.detected_at);
            if time_diff > params.time_window_seconds {
                continue;
            }

            let separation = angular_separation(
                event1.ra_deg,
                event1.dec_deg,
                event2.ra_deg,
                event2.dec_deg,
            );
            if separation > params.angular_threshold_deg {
                continue;
            }

            let score = confidence_score(time_diff, separation, params);
            if params
                .min_confidence_score
                .is_some_and(|floor| score < floor)
            {
                continue;
            }

            pairs.push(EventPair {
                event1: event1.clone(),
                event2: event2.clone(),
                time_diff_seconds: time_diff,
                angular_separation_deg: separation,
                correlation_type: correlation_type(&event1.messenger, &event2.messenger),
                confidence_score: score,
            });
        }
    }

    // sort_by is stable: equal scores keep their enumeration order.
    pairs.sort_by(|a, b| b.confidence_score.total_cmp(&a.confidence_score));

    tracing::debug!(
        events = events.len(),
        qualifying = pairs.len(),
        "correlation run complete"
    );

    Ok(pairs)
}
