//! Tunable thresholds for lock classification, drift detection and
//! landmark look-ahead.

/// Thresholds used by the resolver and the motion evaluator.
///
/// All distances are in meters and all speeds in km/h. Missing fields in a
/// serialized config fall back to [`LocatorConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocatorConfig {
    /// Fixes at or below this accuracy have a strong lock
    pub strong_lock_max_accuracy_m: f64,
    /// Fixes at or below this accuracy (and above the strong bound) have a weak lock
    pub weak_lock_max_accuracy_m: f64,
    /// Jump between consecutive fixes that flags drift
    pub drift_threshold_m: f64,
    /// Radius searched for a speed-restricted landmark
    pub restriction_lookahead_m: f64,
    /// Radius for the upcoming-landmark list
    pub landmark_radius_m: f64,
    /// Radius for the nearby-stations list
    pub nearby_station_radius_m: f64,
    /// Overspeed ratio above which a restriction breach is critical
    pub critical_overspeed_ratio: f64,
    /// Limit applied when no restricted landmark is in range
    pub default_line_speed_kmh: f64,
    /// Accuracy assigned to IP-geolocation fixes
    pub fallback_accuracy_m: f64,
    /// Age after which a fix no longer counts as a lock
    pub stale_after_ms: i64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            strong_lock_max_accuracy_m: 50.0,
            weak_lock_max_accuracy_m: 100.0,
            drift_threshold_m: 3_000.0,
            restriction_lookahead_m: 2_000.0,
            landmark_radius_m: 5_000.0,
            nearby_station_radius_m: 10_000.0,
            critical_overspeed_ratio: 1.2,
            default_line_speed_kmh: 80.0,
            fallback_accuracy_m: 5_000.0,
            stale_after_ms: 30_000,
        }
    }
}
