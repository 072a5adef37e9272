//! R-tree nodes for spatial indexing.
//!
//! Catalog entries are stored as unit vectors on the sphere rather than as
//! raw longitude/latitude pairs. Chord length between unit vectors grows
//! monotonically with great-circle distance, so a radius query in this space
//! has no seam at the antimeridian and no distortion near the poles.
//!
//! ## Two-Stage Filtering
//!
//! 1. **R-tree filter**: chord-distance query padded by a small tolerance
//! 2. **Haversine filter**: exact distance check on the candidates
//!
//! The R-tree only ever narrows the candidate set; the resolver makes the
//! final inclusion decision with [`haversine_distance`](super::haversine_distance).

use rstar::{PointDistance, RTreeObject, AABB};

use crate::models::types::Coordinate;
use crate::spatial::queries::EARTH_RADIUS_M;

/// Relative padding on the chord radius so rounding never drops a candidate
/// that the haversine check would keep.
const CHORD_TOLERANCE: f64 = 1e-9;

/// Map a coordinate onto the unit sphere
pub fn unit_vector(coordinate: Coordinate) -> [f64; 3] {
    let lat = coordinate.latitude.to_radians();
    let lon = coordinate.longitude.to_radians();

    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Squared chord length (unit sphere) covering a surface distance in meters.
///
/// Returns `None` when the radius reaches halfway around the globe, in which
/// case every entry is a candidate.
pub fn squared_chord_for_distance(distance_m: f64) -> Option<f64> {
    let angle = distance_m / EARTH_RADIUS_M;
    if angle >= std::f64::consts::PI {
        return None;
    }

    let chord = 2.0 * (angle / 2.0).sin() * (1.0 + CHORD_TOLERANCE) + CHORD_TOLERANCE;
    Some(chord * chord)
}

// ============================================================================
// Catalog Entry Spatial Node
// ============================================================================

/// Position of one catalog entry, keyed by its insertion index.
///
/// The index lets query results be put back into catalog order, which the
/// resolver needs for deterministic tie-breaking.
#[derive(Clone, Debug)]
pub struct CatalogNode {
    pub index: usize,
    point: [f64; 3],
}

impl CatalogNode {
    pub fn new(index: usize, location: Coordinate) -> Self {
        Self {
            index,
            point: unit_vector(location),
        }
    }
}

impl RTreeObject for CatalogNode {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CatalogNode {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::queries::haversine_distance;
    use rstar::RTree;

    #[test]
    fn test_unit_vector_is_normalized() {
        for coordinate in [
            Coordinate::new(11.0, 76.9),
            Coordinate::new(-45.0, -170.0),
            Coordinate::new(90.0, 0.0),
        ] {
            let [x, y, z] = unit_vector(coordinate);
            assert!((x * x + y * y + z * z - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_chord_radius_covers_haversine_radius() {
        let a = Coordinate::new(11.008, 76.965);
        let b = Coordinate::new(11.025, 76.945);
        let dist = haversine_distance(a, b);

        let node = CatalogNode::new(0, b);
        let max = squared_chord_for_distance(dist).unwrap();
        assert!(node.distance_2(&unit_vector(a)) <= max);
    }

    #[test]
    fn test_half_globe_radius_is_unbounded() {
        assert!(squared_chord_for_distance(EARTH_RADIUS_M * 4.0).is_none());
        assert!(squared_chord_for_distance(1_000.0).is_some());
    }

    #[test]
    fn test_query_across_antimeridian() {
        let tree = RTree::bulk_load(vec![
            CatalogNode::new(0, Coordinate::new(0.0, 179.95)),
            CatalogNode::new(1, Coordinate::new(0.0, -179.95)),
            CatalogNode::new(2, Coordinate::new(0.0, 0.0)),
        ]);

        let query = unit_vector(Coordinate::new(0.0, 180.0));
        let max = squared_chord_for_distance(10_000.0).unwrap();

        let mut hits: Vec<usize> = tree
            .locate_within_distance(query, max)
            .map(|node| node.index)
            .collect();
        hits.sort_unstable();

        assert_eq!(hits, vec![0, 1]);
    }
}
