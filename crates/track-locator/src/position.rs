//! Track-km and chainage estimation from a raw coordinate.
//!
//! The estimate extrapolates linearly in latitude from the nearest station,
//! which only holds for roughly north-south track. `chainage_m` is the
//! straight-line distance to that station, not an along-track measurement.

use std::sync::Arc;

use crate::catalog::Station;
use crate::models::{traits::FeatureCatalog, types::*};
use crate::resolver::{find_nearest_station, StationMatch};

/// Degrees of latitude to kilometers
pub const KM_PER_DEGREE_LATITUDE: f64 = 111.0;

/// Railway-relative position derived from one coordinate
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResolvedPosition {
    /// `None` when no station data is loaded
    pub nearest_station: Option<Arc<Station>>,
    pub distance_to_station_m: f64,
    pub estimated_track_km: f64,
    pub chainage_m: f64,
}

impl ResolvedPosition {
    /// Position-unknown state: km 0, chainage 0
    pub fn unknown() -> Self {
        Self {
            nearest_station: None,
            distance_to_station_m: 0.0,
            estimated_track_km: 0.0,
            chainage_m: 0.0,
        }
    }

    fn from_match(position: Coordinate, nearest: StationMatch) -> Self {
        let km_offset = (position.latitude - nearest.station.location.latitude) * KM_PER_DEGREE_LATITUDE;

        Self {
            estimated_track_km: nearest.station.track_km + km_offset,
            distance_to_station_m: nearest.distance_m,
            chainage_m: nearest.distance_m,
            nearest_station: Some(nearest.station),
        }
    }

    pub fn is_known(&self) -> bool {
        self.nearest_station.is_some()
    }

    /// Block section of the nearest station as (start, end)
    pub fn block_section(&self) -> Option<(&str, &str)> {
        self.nearest_station
            .as_deref()
            .map(|s| (&*s.block_section_start, &*s.block_section_end))
    }

    /// Fraction of the section from `from_km` to `to_km` already covered,
    /// clamped to [0, 1]. Works in either direction of travel.
    pub fn progress_between(&self, from_km: f64, to_km: f64) -> f64 {
        let span = to_km - from_km;
        if span == 0.0 || !span.is_finite() {
            return 0.0;
        }

        let fraction = (self.estimated_track_km - from_km) / span;
        if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        }
    }
}

/// Resolve `position` against the nearest station.
///
/// Never fails: an empty station catalog yields [`ResolvedPosition::unknown`].
/// Input is not range-checked; see [`try_estimate_track_position`].
pub fn estimate_track_position<C>(catalog: &C, position: Coordinate) -> ResolvedPosition
where
    C: FeatureCatalog + ?Sized,
{
    match find_nearest_station(catalog, position) {
        Ok(nearest) => ResolvedPosition::from_match(position, nearest),
        Err(_) => ResolvedPosition::unknown(),
    }
}

/// Checked variant of [`estimate_track_position`].
///
/// Fails with [`LocatorError::InvalidCoordinate`] for out-of-range input and
/// [`LocatorError::EmptyCatalog`] when no station data is loaded.
pub fn try_estimate_track_position<C>(catalog: &C, position: Coordinate) -> Result<ResolvedPosition>
where
    C: FeatureCatalog + ?Sized,
{
    position.validate()?;
    let nearest = find_nearest_station(catalog, position)?;
    Ok(ResolvedPosition::from_match(position, nearest))
}
