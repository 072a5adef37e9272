//! Read-only catalog interface.
//!
//! Consumers never touch the raw station and landmark lists directly; they
//! go through the resolver, which only needs this trait. Implementations can
//! be embedded, file-backed or database-backed.

use std::sync::Arc;

use crate::catalog::{Landmark, Station};
use crate::identifiers::*;
use crate::models::types::Coordinate;

/// Provider of station and landmark reference data
pub trait FeatureCatalog: Send + Sync {
    // ---- Lookups ----
    fn get_station(&self, code: &StationCode) -> Option<Arc<Station>>;
    fn get_landmark(&self, id: &LandmarkId) -> Option<Arc<Landmark>>;

    // ---- Collections (insertion order) ----
    fn stations(&self) -> &[Arc<Station>];
    fn landmarks(&self) -> &[Arc<Landmark>];

    // ---- Spatial prefilters ----

    /// Indices into [`stations`](Self::stations) that may lie within
    /// `radius_m` of `point`, in ascending order.
    ///
    /// The result may contain extra entries but must never miss one. The
    /// default returns every index.
    fn station_candidates(&self, point: Coordinate, radius_m: f64) -> Vec<usize> {
        let _ = (point, radius_m);
        (0..self.stations().len()).collect()
    }

    /// Same contract as [`station_candidates`](Self::station_candidates),
    /// over [`landmarks`](Self::landmarks).
    fn landmark_candidates(&self, point: Coordinate, radius_m: f64) -> Vec<usize> {
        let _ = (point, radius_m);
        (0..self.landmarks().len()).collect()
    }
}
