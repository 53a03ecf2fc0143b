//! Great-circle geometry on the celestial sphere.

/// Computes the great-circle angular separation between two sky positions.
///
/// Inputs and output are in degrees. Uses the haversine formula on the unit
/// sphere, which stays well conditioned for small separations. Right
/// ascension wraparound needs no explicit modulo: sine and cosine are
/// periodic, so 359.9 and 0.1 come out 0.2 degrees apart.
///
/// Symmetric under argument swap, zero for identical coordinates, and always
/// within \[0, 180\].
#[must_use]
pub fn angular_separation(ra1_deg: f64, dec1_deg: f64, ra2_deg: f64, dec2_deg: f64) -> f64 {
    let dec1 = dec1_deg.to_radians();
    let dec2 = dec2_deg.to_radians();
    let delta_ra = (ra2_deg - ra1_deg).to_radians();
    let delta_dec = dec2 - dec1;

    let a = (delta_dec / 2.0).sin().powi(2)
        + dec1.cos() * dec2.cos() * (delta_ra / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    c.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn identical_coordinates_separate_by_zero() {
        assert!(angular_separation(10.0, 20.0, 10.0, 20.0).abs() < TOLERANCE);
        assert!(angular_separation(0.0, -90.0, 0.0, -90.0).abs() < TOLERANCE);
    }

    #[test]
    fn separation_is_symmetric() {
        let cases = [
            (10.0, 0.0, 10.0, 1.0),
            (350.0, -30.0, 20.0, 45.0),
            (0.0, 90.0, 180.0, -90.0),
        ];
        for (ra1, dec1, ra2, dec2) in cases {
            let forward = angular_separation(ra1, dec1, ra2, dec2);
            let reverse = angular_separation(ra2, dec2, ra1, dec1);
            assert!(
                (forward - reverse).abs() < TOLERANCE,
                "asymmetric for ({ra1},{dec1})-({ra2},{dec2}): {forward} vs {reverse}"
            );
        }
    }

    #[test]
    fn separation_stays_within_bounds() {
        let positions = [
            (0.0, 0.0),
            (359.999, 89.999),
            (180.0, -89.999),
            (90.0, 45.0),
            (270.0, -45.0),
        ];
        for &(ra1, dec1) in &positions {
            for &(ra2, dec2) in &positions {
                let sep = angular_separation(ra1, dec1, ra2, dec2);
                assert!(
                    (0.0..=180.0).contains(&sep),
                    "out of bounds for ({ra1},{dec1})-({ra2},{dec2}): {sep}"
                );
            }
        }
    }

    #[test]
    fn antipodal_points_separate_by_180() {
        let sep = angular_separation(0.0, 90.0, 0.0, -90.0);
        assert!((sep - 180.0).abs() < TOLERANCE);

        let sep = angular_separation(0.0, 0.0, 180.0, 0.0);
        assert!((sep - 180.0).abs() < TOLERANCE);
    }

    #[test]
    fn declination_offset_on_same_meridian() {
        // Along a meridian the separation equals the declination difference.
        let sep = angular_separation(10.0, 0.0, 10.0, 1.0);
        assert!((sep - 1.0).abs() < 1e-6);
    }

    #[test]
    fn right_ascension_wraparound() {
        // 359.5 and 0.5 degrees RA on the equator are one degree apart.
        let sep = angular_separation(359.5, 0.0, 0.5, 0.0);
        assert!((sep - 1.0).abs() < 1e-6);
    }

    #[test]
    fn right_ascension_offset_shrinks_toward_poles() {
        let equator = angular_separation(10.0, 0.0, 11.0, 0.0);
        let high = angular_separation(10.0, 80.0, 11.0, 80.0);
        assert!(high < equator);
    }
}
