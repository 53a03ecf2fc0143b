//! Detection-time arithmetic.

use chrono::{DateTime, Utc};

/// Returns the absolute difference between two detection times, in seconds.
///
/// Sub-second precision is kept down to the millisecond. Inputs are
/// already-typed `DateTime<Utc>` values; feeds with unparseable timestamps
/// are rejected at the deserialization boundary, so this function is total
/// and never produces NaN.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "millisecond counts in practice are far below 2^52"
)]
pub fn time_difference(t1: DateTime<Utc>, t2: DateTime<Utc>) -> f64 {
    let millis = (t2 - t1).num_milliseconds().abs();
    millis as f64 / 1000.0
}
