//! Permanent speed restriction (PSR) compliance.

use std::sync::Arc;

use crate::catalog::Landmark;
use crate::config::LocatorConfig;
use crate::models::{traits::FeatureCatalog, types::*};
use crate::position::ResolvedPosition;
use crate::resolver::nearest_restricted_landmark;

const STANDARD_SECTION: &str = "Standard Section";

/// Classify current speed against a limit.
///
/// Critical strictly above `limit × ratio`, warning strictly above the
/// limit, normal otherwise. Both bounds are exclusive.
pub fn classify_severity(current_kmh: f64, limit_kmh: f64, critical_ratio: f64) -> Severity {
    if current_kmh > limit_kmh * critical_ratio {
        Severity::Critical
    } else if current_kmh > limit_kmh {
        Severity::Warning
    } else {
        Severity::Normal
    }
}

/// Speed-restriction state for one fix
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RestrictionState {
    /// Landmark imposing the limit, `None` on plain line
    pub applicable_landmark: Option<Arc<Landmark>>,
    pub distance_to_landmark_m: Option<f64>,
    pub limit_kmh: f64,
    pub current_speed_kmh: f64,
    pub severity: Severity,
    /// Landmark name, or "Standard Section"
    pub reason: String,
    /// `KM x.x` label for the restriction, when one can be given
    pub section: Option<String>,
}

impl RestrictionState {
    /// How far over the limit the current speed is, zero when compliant
    pub fn overspeed_kmh(&self) -> f64 {
        (self.current_speed_kmh - self.limit_kmh).max(0.0)
    }
}

/// Evaluate the speed restriction that applies to `fix`.
///
/// Looks for the nearest landmark within the configured look-ahead that
/// carries a restriction. With none in range the configured line speed
/// applies and the section label comes from the resolved track km.
pub fn evaluate_restriction<C>(
    catalog: &C,
    fix: &PositionFix,
    resolved: &ResolvedPosition,
    config: &LocatorConfig,
) -> RestrictionState
where
    C: FeatureCatalog + ?Sized,
{
    let current_speed_kmh = fix.speed_kmh();
    let hit = nearest_restricted_landmark(catalog, fix.coordinate, config.restriction_lookahead_m);

    let (landmark, distance, limit_kmh) = match hit {
        Some(hit) => {
            let limit = hit
                .landmark
                .speed_restriction_kmh
                .unwrap_or(config.default_line_speed_kmh);
            (Some(hit.landmark), Some(hit.distance_m), limit)
        }
        None => (None, None, config.default_line_speed_kmh),
    };

    let reason = landmark
        .as_ref()
        .map(|l| l.name.to_string())
        .unwrap_or_else(|| STANDARD_SECTION.to_string());

    let section = match &landmark {
        Some(l) => Some(format!("KM {:.1}", l.track_km)),
        None if resolved.is_known() => Some(format!("KM {:.1}", resolved.estimated_track_km)),
        None => None,
    };

    RestrictionState {
        severity: classify_severity(current_speed_kmh, limit_kmh, config.critical_overspeed_ratio),
        applicable_landmark: landmark,
        distance_to_landmark_m: distance,
        limit_kmh,
        current_speed_kmh,
        reason,
        section,
    }
}
