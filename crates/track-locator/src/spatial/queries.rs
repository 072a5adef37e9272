//! Distance and bearing between coordinates.
//!
//! Uses the Haversine formula on a sphere of fixed radius. The ellipsoid
//! error (under 0.5%) is accepted; all distance thresholds in the crate are
//! expressed against this sphere.

use geo::HaversineBearing;

use crate::models::types::Coordinate;

/// Sphere radius used for every distance in the crate
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate Haversine distance between two coordinates in meters
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push h just outside [0, 1] for antipodal points
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial great-circle bearing from `from` towards `to`, in [0, 360)
pub fn initial_bearing(from: Coordinate, to: Coordinate) -> f64 {
    from.to_point().haversine_bearing(to.to_point()).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const COIMBATORE: Coordinate = Coordinate::new(11.0007, 76.9634);
    const METTUPALAYAM: Coordinate = Coordinate::new(11.3088, 76.5631);

    #[test]
    fn test_known_distance() {
        // Coimbatore Jn to Mettupalayam, straight line
        let dist = haversine_distance(COIMBATORE, METTUPALAYAM);
        assert_relative_eq!(dist, 55_505.0, max_relative = 0.01);
    }

    #[test]
    fn test_long_distance() {
        // NYC to LA is approximately 3,936 km
        let nyc = Coordinate::new(40.7128, -74.0060);
        let la = Coordinate::new(34.0522, -118.2437);

        let dist = haversine_distance(nyc, la);
        assert!((dist - 3_936_000.0).abs() < 50_000.0);
    }

    #[test]
    fn test_symmetry_and_identity() {
        let points = [
            COIMBATORE,
            METTUPALAYAM,
            Coordinate::new(-33.8688, 151.2093),
            Coordinate::new(89.9, 0.0),
            Coordinate::new(0.0, 179.99),
        ];

        for a in points {
            assert_eq!(haversine_distance(a, a), 0.0);
            for b in points {
                assert_abs_diff_eq!(
                    haversine_distance(a, b),
                    haversine_distance(b, a),
                    epsilon = 1e-6
                );
            }
        }
    }

    #[test]
    fn test_antimeridian_wraparound() {
        let east = Coordinate::new(0.0, 179.9);
        let west = Coordinate::new(0.0, -179.9);

        // 0.2 degrees of longitude at the equator, not 359.8
        let dist = haversine_distance(east, west);
        assert_relative_eq!(dist, 22_239.0, max_relative = 0.001);
    }

    #[test]
    fn test_pole_crossing() {
        let a = Coordinate::new(89.5, 0.0);
        let b = Coordinate::new(89.5, 180.0);

        // One degree of latitude over the pole
        let dist = haversine_distance(a, b);
        assert_relative_eq!(dist, 111_195.0, max_relative = 0.001);
    }

    #[test]
    fn test_antipodal_points_are_finite() {
        let dist = haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert_relative_eq!(dist, std::f64::consts::PI * EARTH_RADIUS_M, max_relative = 1e-9);
    }

    #[test]
    fn test_initial_bearing() {
        let origin = Coordinate::new(0.0, 0.0);

        assert_abs_diff_eq!(initial_bearing(origin, Coordinate::new(1.0, 0.0)), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(initial_bearing(origin, Coordinate::new(0.0, 1.0)), 90.0, epsilon = 1e-6);
        assert_abs_diff_eq!(initial_bearing(origin, Coordinate::new(-1.0, 0.0)), 180.0, epsilon = 1e-6);
        assert_abs_diff_eq!(initial_bearing(origin, Coordinate::new(0.0, -1.0)), 270.0, epsilon = 1e-6);
    }
}
