//! Spatiotemporal confidence scoring for candidate pairs.

use crate::correlate::CorrelationParams;

/// Weight applied to temporal proximity.
///
/// Temporal coincidence carries more weight than spatial coincidence:
/// multi-messenger progenitors such as neutron-star mergers emit their
/// signals near-simultaneously, while localization uncertainty varies
/// wildly by messenger. Fixed, not user-configurable: changing it would
/// make new scores incomparable with previously scored results.
pub const TIME_WEIGHT: f64 = 0.7;

/// Weight applied to spatial proximity.
pub const SPATIAL_WEIGHT: f64 = 0.3;

/// Combines time and angular proximity into a single score in \[0, 1\].
///
/// Each component decays linearly from 1 at zero separation to 0 at the
/// corresponding window edge:
///
/// ```text
/// time_score    = max(0, 1 - time_diff / time_window_seconds)
/// spatial_score = max(0, 1 - angular_sep / angular_threshold_deg)
/// score         = 0.7 * time_score + 0.3 * spatial_score
/// ```
///
/// Callers must have validated the parameters
/// ([`CorrelationParams::validate`]); both window values being positive is
/// what keeps the divisions finite.
#[must_use]
pub fn confidence_score(
    time_diff_secs: f64,
    angular_sep_deg: f64,
    params: &CorrelationParams,
) -> f64 {
    let time_score = (1.0 - time_diff_secs / params.time_window_seconds).max(0.0);
    let spatial_score = (1.0 - angular_sep_deg / params.angular_threshold_deg).max(0.0);
    (TIME_WEIGHT * time_score + SPATIAL_WEIGHT * spatial_score).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(window_secs: f64, threshold_deg: f64) -> CorrelationParams {
        CorrelationParams {
            time_window_seconds: window_secs,
            angular_threshold_deg: threshold_deg,
            min_confidence_score: None,
        }
    }

    #[test]
    #[expect(
        clippy::float_cmp,
        reason = "exact equality intended for the perfect-coincidence case"
    )]
    fn perfect_coincidence_scores_one() {
        assert_eq!(confidence_score(0.0, 0.0, &params(600.0, 1.0)), 1.0);
    }

    #[test]
    fn window_edges_score_zero() {
        let p = params(600.0, 1.0);
        assert!(confidence_score(600.0, 1.0, &p).abs() < f64::EPSILON);
    }

    #[test]
    fn documented_example_scores_as_specified() {
        // 60s apart in a 600s window, at the full 1.0 degree threshold:
        // 0.7 * (1 - 0.1) + 0.3 * 0 = 0.63
        let score = confidence_score(60.0, 1.0, &params(600.0, 1.0));
        assert!((score - 0.63).abs() < 1e-12);
    }

    #[test]
    fn score_is_monotonic_in_time_difference() {
        let p = params(600.0, 1.0);
        let mut previous = f64::INFINITY;
        for step in 0..=10 {
            let time_diff = f64::from(step) * 60.0;
            let score = confidence_score(time_diff, 0.5, &p);
            assert!(score <= previous, "score increased at time_diff={time_diff}");
            previous = score;
        }
    }

    #[test]
    fn score_is_monotonic_in_angular_separation() {
        let p = params(600.0, 2.0);
        let mut previous = f64::INFINITY;
        for step in 0..=10 {
            let sep = f64::from(step) * 0.2;
            let score = confidence_score(30.0, sep, &p);
            assert!(score <= previous, "score increased at sep={sep}");
            previous = score;
        }
    }

    #[test]
    fn score_stays_within_unit_interval() {
        let p = params(600.0, 1.0);
        for time_diff in [0.0, 1.0, 599.0, 600.0, 10_000.0] {
            for sep in [0.0, 0.5, 1.0, 90.0] {
                let score = confidence_score(time_diff, sep, &p);
                assert!((0.0..=1.0).contains(&score));
            }
        }
    }

    #[test]
    fn weights_sum_to_one() {
        assert!((TIME_WEIGHT + SPATIAL_WEIGHT - 1.0).abs() < f64::EPSILON);
    }
}
