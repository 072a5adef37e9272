//! One synchronous pass from a position fix to a full motion report.

use crate::config::LocatorConfig;
use crate::models::{traits::FeatureCatalog, types::*};
use crate::motion::drift::DriftDetector;
use crate::motion::lock::classify_lock;
use crate::motion::restriction::{evaluate_restriction, RestrictionState};
use crate::position::{estimate_track_position, ResolvedPosition};
use crate::region::describe_region;
use crate::resolver::{find_upcoming_landmarks, stations_within, LandmarkHit, StationMatch};

/// Everything derived from a single fix
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MotionReport {
    pub fix: PositionFix,
    pub lock: LockStatus,
    pub is_drifting: bool,
    pub drift_distance_m: Option<f64>,
    /// Fix came from IP geolocation rather than the receiver
    pub is_fallback: bool,
    pub is_stale: bool,
    pub speed_kmh: f64,
    pub satellites: u8,
    pub region: String,
    pub position: ResolvedPosition,
    pub nearby_stations: Vec<StationMatch>,
    pub upcoming_landmarks: Vec<LandmarkHit>,
    pub restriction: RestrictionState,
}

/// Turns successive fixes into [`MotionReport`]s.
///
/// The only state carried between fixes is the last accepted receiver
/// coordinate, used for drift detection. Fallback fixes are evaluated but
/// never accepted, so a coarse IP position cannot trigger or mask drift.
#[derive(Clone, Debug)]
pub struct MotionEvaluator {
    config: LocatorConfig,
    drift: DriftDetector,
}

impl MotionEvaluator {
    pub fn new(config: LocatorConfig) -> Self {
        Self {
            drift: DriftDetector::new(config.drift_threshold_m),
            config,
        }
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Forget the previous fix, e.g. after a subscription restarts
    pub fn reset(&mut self) {
        self.drift.reset();
    }

    /// Evaluate `fix` at wall-clock time `now_ms`.
    ///
    /// Fails only on malformed input; an empty catalog produces a report
    /// with an unknown position.
    pub fn evaluate<C>(&mut self, catalog: &C, fix: &PositionFix, now_ms: i64) -> Result<MotionReport>
    where
        C: FeatureCatalog + ?Sized,
    {
        fix.validate()?;

        let is_fallback = fix.is_fallback();
        let is_stale = now_ms.saturating_sub(fix.timestamp_ms) > self.config.stale_after_ms;

        let lock = if is_fallback || is_stale {
            LockStatus::NoFix
        } else {
            classify_lock(fix.accuracy_m, &self.config)
        };

        let drift = if is_fallback {
            tracing::warn!(
                latitude = fix.coordinate.latitude,
                longitude = fix.coordinate.longitude,
                accuracy_m = fix.accuracy_m,
                "using fallback location"
            );
            self.drift.check(fix.coordinate)
        } else {
            self.drift.observe(fix.coordinate)
        };

        if drift.is_drifting {
            tracing::warn!(jump_m = drift.jump_m, "GPS drift detected");
        }

        let position = estimate_track_position(catalog, fix.coordinate);
        let upcoming_landmarks =
            find_upcoming_landmarks(catalog, fix.coordinate, self.config.landmark_radius_m);
        let nearby_stations =
            stations_within(catalog, fix.coordinate, self.config.nearby_station_radius_m);
        let restriction = evaluate_restriction(catalog, fix, &position, &self.config);

        tracing::trace!(
            lock = lock.as_str(),
            track_km = position.estimated_track_km,
            severity = ?restriction.severity,
            "evaluated fix"
        );

        Ok(MotionReport {
            fix: fix.clone(),
            lock,
            is_drifting: drift.is_drifting,
            drift_distance_m: drift.jump_m,
            is_fallback,
            is_stale,
            speed_kmh: fix.speed_kmh(),
            satellites: fix.estimated_satellites(),
            region: describe_region(fix.coordinate),
            position,
            nearby_stations,
            upcoming_landmarks,
            restriction,
        })
    }
}

impl Default for MotionEvaluator {
    fn default() -> Self {
        Self::new(LocatorConfig::default())
    }
}
