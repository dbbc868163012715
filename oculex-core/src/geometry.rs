/// Angle of the vector (x, y) in degrees, in [0, 360).
pub fn ang_deg(x: f64, y: f64) -> f64 {
    let degrees = y.atan2(x).to_degrees();
    (degrees + 360.0) % 360.0
}

/// Angular difference between two angles in degrees, in [0, 180].
pub fn ang_diff(a1: f64, a2: f64) -> f64 {
    180.0 - ((a1 - a2).abs() - 180.0).abs()
}

/// Base-10 logarithm with log10(0.0) -> -inf by convention, so that
/// zero-probability evidence buckets stay signed extremes instead of NaN.
pub fn log10(x: f64) -> f64 {
    if x == 0.0 {
        f64::NEG_INFINITY
    } else {
        x.log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn ang_deg_cardinal_directions() {
        assert!((ang_deg(1.0, 0.0) - 0.0).abs() < TOL);
        assert!((ang_deg(0.0, 1.0) - 90.0).abs() < TOL);
        assert!((ang_deg(-1.0, 0.0) - 180.0).abs() < TOL);
        assert!((ang_deg(0.0, -1.0) - 270.0).abs() < TOL);
    }

    #[test]
    fn ang_deg_stays_in_range() {
        for i in 0..360 {
            let theta = (i as f64).to_radians();
            let a = ang_deg(theta.cos(), theta.sin());
            assert!((0.0..360.0).contains(&a));
        }
    }

    #[test]
    fn ang_diff_identity_and_opposition() {
        for a in [0.0, 45.0, 180.0, 359.0] {
            assert!(ang_diff(a, a).abs() < TOL);
            assert!((ang_diff(a, a + 180.0) - 180.0).abs() < TOL);
        }
    }

    #[test]
    fn ang_diff_wraps_and_stays_in_range() {
        assert!((ang_diff(350.0, 10.0) - 20.0).abs() < TOL);
        for a in 0..36 {
            for b in 0..36 {
                let d = ang_diff(a as f64 * 10.0, b as f64 * 10.0);
                assert!((0.0..=180.0).contains(&d));
            }
        }
    }

    #[test]
    fn log10_of_zero_is_negative_infinity() {
        assert_eq!(log10(0.0), f64::NEG_INFINITY);
        assert!((log10(100.0) - 2.0).abs() < TOL);
    }
}
