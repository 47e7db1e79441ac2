//! Great-circle distance between two coordinates.

/// Distance between two points in kilometers, by the spherical law of
/// cosines.
///
/// Identical points short-circuit to `0.0` so `acos` never sees a domain
/// error, and the cosine argument is clamped to `1.0` against floating-point
/// overshoot.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let rad_lat1 = lat1.to_radians();
    let rad_lat2 = lat2.to_radians();
    let rad_theta = (lon1 - lon2).to_radians();

    let mut dist =
        rad_lat1.sin() * rad_lat2.sin() + rad_lat1.cos() * rad_lat2.cos() * rad_theta.cos();
    if dist > 1.0 {
        dist = 1.0;
    }

    // arc in degrees, then degrees -> nautical miles -> kilometers
    dist.acos().to_degrees() * 60.0 * 1.8524
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_exactly_zero() {
        assert_eq!(distance_km(55.75, 37.61, 55.75, 37.61), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = distance_km(55.7558, 37.6173, 59.9311, 30.3609);
        let b = distance_km(59.9311, 30.3609, 55.7558, 37.6173);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn moscow_to_saint_petersburg_is_roughly_635_km() {
        let d = distance_km(55.7558, 37.6173, 59.9311, 30.3609);
        assert!((600.0..670.0).contains(&d), "got {d}");
    }

    #[test]
    fn nearby_points_do_not_produce_nan() {
        let d = distance_km(55.0, 37.0, 55.0, 37.0000001);
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }
}
