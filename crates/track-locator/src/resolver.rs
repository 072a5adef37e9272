//! Nearest-feature resolution over a [`FeatureCatalog`].
//!
//! Every query is a pure function of the catalog and the position. Results
//! are deterministic: distance ties keep catalog insertion order.

use std::sync::Arc;

use crate::catalog::{Landmark, Station};
use crate::models::{traits::FeatureCatalog, types::*};
use crate::spatial::{haversine_distance, initial_bearing};

/// A station together with its distance from the query position
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StationMatch {
    pub station: Arc<Station>,
    pub distance_m: f64,
}

/// A landmark within the query radius
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LandmarkHit {
    pub landmark: Arc<Landmark>,
    pub distance_m: f64,
    /// Initial bearing from the query position to the landmark, in [0, 360)
    pub bearing_deg: f64,
}

/// Find the station closest to `position`.
///
/// Linear scan over the whole catalog. On an exact distance tie the station
/// that appears first in the catalog wins.
pub fn find_nearest_station<C>(catalog: &C, position: Coordinate) -> Result<StationMatch>
where
    C: FeatureCatalog + ?Sized,
{
    let mut best: Option<StationMatch> = None;

    for station in catalog.stations() {
        let distance_m = haversine_distance(position, station.location);

        let closer = match &best {
            Some(current) => distance_m < current.distance_m,
            None => true,
        };
        if closer {
            best = Some(StationMatch {
                station: station.clone(),
                distance_m,
            });
        }
    }

    best.ok_or(LocatorError::EmptyCatalog(CatalogKind::Stations))
}

/// All landmarks within `max_distance_m` (inclusive), nearest first.
///
/// An empty result is a normal outcome, including for an empty catalog or a
/// negative radius. Equal distances keep catalog order.
pub fn find_upcoming_landmarks<C>(
    catalog: &C,
    position: Coordinate,
    max_distance_m: f64,
) -> Vec<LandmarkHit>
where
    C: FeatureCatalog + ?Sized,
{
    let landmarks = catalog.landmarks();

    let mut hits: Vec<LandmarkHit> = catalog
        .landmark_candidates(position, max_distance_m)
        .into_iter()
        .filter_map(|i| landmarks.get(i))
        .filter_map(|landmark| {
            let distance_m = haversine_distance(position, landmark.location);
            (distance_m <= max_distance_m).then(|| LandmarkHit {
                landmark: landmark.clone(),
                distance_m,
                bearing_deg: initial_bearing(position, landmark.location),
            })
        })
        .collect();

    // Stable: candidates arrive in catalog order
    hits.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    hits
}

/// All stations within `radius_m` (inclusive), nearest first.
///
/// Backs the "nearby stations" list. Equal distances keep catalog order.
pub fn stations_within<C>(catalog: &C, position: Coordinate, radius_m: f64) -> Vec<StationMatch>
where
    C: FeatureCatalog + ?Sized,
{
    let stations = catalog.stations();

    let mut matches: Vec<StationMatch> = catalog
        .station_candidates(position, radius_m)
        .into_iter()
        .filter_map(|i| stations.get(i))
        .filter_map(|station| {
            let distance_m = haversine_distance(position, station.location);
            (distance_m <= radius_m).then(|| StationMatch {
                station: station.clone(),
                distance_m,
            })
        })
        .collect();

    matches.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    matches
}

/// Nearest landmark within `max_distance_m` that carries a speed restriction
pub fn nearest_restricted_landmark<C>(
    catalog: &C,
    position: Coordinate,
    max_distance_m: f64,
) -> Option<LandmarkHit>
where
    C: FeatureCatalog + ?Sized,
{
    find_upcoming_landmarks(catalog, position, max_distance_m)
        .into_iter()
        .find(|hit| hit.landmark.speed_restriction_kmh.is_some())
}
