//! Haversine distance

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two latitude/longitude points.
///
/// NaN inputs propagate to a NaN result; callers validate coordinates first.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = lat1_rad - lat2_rad;
    let delta_lon = lon1.to_radians() - lon2.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_distance() {
        assert_eq!(haversine_km(20.5, 85.8, 20.5, 85.8), 0.0);
    }

    #[test]
    fn test_one_degree_on_equator() {
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert_relative_eq!(haversine_km(0.0, 0.0, 0.0, 1.0), expected, epsilon = 1e-9);
        assert_relative_eq!(haversine_km(0.0, 0.0, 1.0, 0.0), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_symmetric() {
        let ab = haversine_km(21.05, 86.5, 19.8, 85.8);
        let ba = haversine_km(19.8, 85.8, 21.05, 86.5);
        assert_relative_eq!(ab, ba, epsilon = 1e-12);
    }

    #[test]
    fn test_known_distance() {
        // Bhubaneswar to Cuttack, about 19.5 km apart
        let d = haversine_km(20.2961, 85.8245, 20.4625, 85.8830);
        assert!((d - 19.5).abs() < 2.0, "got {} km", d);
    }
}
