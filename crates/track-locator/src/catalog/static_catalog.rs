//! In-memory catalog backed by embedded reference data.
//!
//! Entries are immutable once the catalog is built, so a catalog can be
//! shared across threads and queried without locking.

use std::collections::HashMap;
use std::sync::Arc;

use rstar::RTree;

use crate::identifiers::*;
use crate::models::{traits::*, types::*};
use crate::spatial::index::{squared_chord_for_distance, unit_vector, CatalogNode};

// ============================================================================
// Catalog Entries
// ============================================================================

/// A railway station with its kilometer marker and block section
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub code: StationCode,
    pub name: Arc<str>,
    pub location: Coordinate,
    pub track_km: f64,
    pub block_section_start: Arc<str>,
    pub block_section_end: Arc<str>,
    pub division: Arc<str>,
    pub route: Arc<str>,
    pub state: Arc<str>,
    /// Zero when unknown
    #[cfg_attr(feature = "serde", serde(default))]
    pub platform_count: u8,
}

/// A trackside feature such as a gate, curve or bridge
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Landmark {
    pub id: LandmarkId,
    pub kind: LandmarkKind,
    pub name: Arc<str>,
    pub location: Coordinate,
    pub track_km: f64,
    /// Permanent speed restriction (km/h)
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed_restriction_kmh: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub curve_radius_m: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gradient_percent: Option<f64>,
}

// ============================================================================
// Static Catalog
// ============================================================================

/// In-memory catalog with identity lookups and spatial indexing
///
/// This type is cheap to clone since all entries are stored in `Arc`s.
#[derive(Clone)]
pub struct StaticFeatureCatalog {
    // Core data, in insertion order
    stations: Vec<Arc<Station>>,
    landmarks: Vec<Arc<Landmark>>,

    // Lookup maps
    station_map: HashMap<StationCode, Arc<Station>>,
    landmark_map: HashMap<LandmarkId, Arc<Landmark>>,

    // Spatial indices
    station_tree: RTree<CatalogNode>,
    landmark_tree: RTree<CatalogNode>,
}

impl StaticFeatureCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            stations: Vec::new(),
            landmarks: Vec::new(),
            station_map: HashMap::new(),
            landmark_map: HashMap::new(),
            station_tree: RTree::new(),
            landmark_tree: RTree::new(),
        }
    }

    /// Build a catalog from raw entries.
    ///
    /// Insertion order is preserved and used for tie-breaking. Fails with
    /// [`LocatorError::DuplicateIdentity`] if two stations share a code or
    /// two landmarks share an id.
    pub fn from_data(stations: Vec<Station>, landmarks: Vec<Landmark>) -> Result<Self> {
        let stations: Vec<Arc<Station>> = stations.into_iter().map(Arc::new).collect();
        let landmarks: Vec<Arc<Landmark>> = landmarks.into_iter().map(Arc::new).collect();

        // Build lookup maps
        let mut station_map = HashMap::with_capacity(stations.len());
        for station in &stations {
            if station_map
                .insert(station.code.clone(), station.clone())
                .is_some()
            {
                return Err(LocatorError::DuplicateIdentity(format!(
                    "station {}",
                    station.code
                )));
            }
        }

        let mut landmark_map = HashMap::with_capacity(landmarks.len());
        for landmark in &landmarks {
            if landmark_map
                .insert(landmark.id.clone(), landmark.clone())
                .is_some()
            {
                return Err(LocatorError::DuplicateIdentity(format!(
                    "landmark {}",
                    landmark.id
                )));
            }
        }

        // Build spatial indices
        let station_tree = RTree::bulk_load(
            stations
                .iter()
                .enumerate()
                .map(|(i, s)| CatalogNode::new(i, s.location))
                .collect(),
        );

        let landmark_tree = RTree::bulk_load(
            landmarks
                .iter()
                .enumerate()
                .map(|(i, l)| CatalogNode::new(i, l.location))
                .collect(),
        );

        tracing::debug!(
            stations = stations.len(),
            landmarks = landmarks.len(),
            "built feature catalog"
        );

        Ok(Self {
            stations,
            landmarks,
            station_map,
            landmark_map,
            station_tree,
            landmark_tree,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty() && self.landmarks.is_empty()
    }
}

impl Default for StaticFeatureCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Radius query on one of the trees, returned in catalog order
fn candidates_within(
    tree: &RTree<CatalogNode>,
    len: usize,
    point: Coordinate,
    radius_m: f64,
) -> Vec<usize> {
    if radius_m.is_nan() || radius_m < 0.0 {
        return Vec::new();
    }

    let Some(max_chord_2) = squared_chord_for_distance(radius_m) else {
        return (0..len).collect();
    };

    let mut indices: Vec<usize> = tree
        .locate_within_distance(unit_vector(point), max_chord_2)
        .map(|node| node.index)
        .collect();
    indices.sort_unstable();
    indices
}

impl FeatureCatalog for StaticFeatureCatalog {
    fn get_station(&self, code: &StationCode) -> Option<Arc<Station>> {
        self.station_map.get(code).cloned()
    }

    fn get_landmark(&self, id: &LandmarkId) -> Option<Arc<Landmark>> {
        self.landmark_map.get(id).cloned()
    }

    fn stations(&self) -> &[Arc<Station>] {
        &self.stations
    }

    fn landmarks(&self) -> &[Arc<Landmark>] {
        &self.landmarks
    }

    fn station_candidates(&self, point: Coordinate, radius_m: f64) -> Vec<usize> {
        candidates_within(&self.station_tree, self.stations.len(), point, radius_m)
    }

    fn landmark_candidates(&self, point: Coordinate, radius_m: f64) -> Vec<usize> {
        candidates_within(&self.landmark_tree, self.landmarks.len(), point, radius_m)
    }
}
