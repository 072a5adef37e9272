//! # track-locator
//!
//! Railway-relative positioning from raw GPS fixes.
//!
//! ## Features
//!
//! - **Nearest-feature resolution**: nearest station, landmarks and stations
//!   within a radius, with deterministic tie-breaking
//! - **Track position**: track-km and chainage estimated from the nearest station
//! - **Speed restrictions**: PSR compliance graded normal / warning / critical
//! - **Fix quality**: lock status, drift, staleness and fallback provenance
//! - **Pluggable sources**: implement [`LocationSource`] for your receiver
//!
//! All resolution is synchronous and stateless apart from the drift
//! detector in [`MotionEvaluator`]. Catalogs are immutable once built and
//! can be shared between threads freely.
//!
//! ## Example
//!
//! ```
//! use track_locator::prelude::*;
//!
//! # fn main() -> track_locator::Result<()> {
//! let catalog = builtin::coimbatore_region()?;
//!
//! // On LC gate 101, just north of Coimbatore Junction
//! let here = Coordinate::new(11.008, 76.965);
//!
//! let nearest = find_nearest_station(&catalog, here)?;
//! assert_eq!(nearest.station.code.as_str(), "CBE");
//!
//! let landmarks = find_upcoming_landmarks(&catalog, here, 5000.0);
//! assert_eq!(landmarks[0].landmark.id.as_str(), "LC101");
//!
//! let fix = PositionFix::new(here, 8.0, 0).with_speed(10.0); // 36 km/h
//! let mut evaluator = MotionEvaluator::default();
//! let report = evaluator.evaluate(&catalog, &fix, 0)?;
//! assert_eq!(report.restriction.severity, Severity::Critical);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod identifiers;
pub mod models;
pub mod motion;
pub mod position;
pub mod region;
pub mod resolver;
pub mod source;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::catalog::{builtin, Landmark, StaticFeatureCatalog, Station};
    pub use crate::config::LocatorConfig;
    pub use crate::identifiers::*;
    pub use crate::models::{traits::*, types::*};
    pub use crate::motion::{
        classify_lock, classify_severity, evaluate_restriction, DriftDetector, MotionEvaluator,
        MotionReport, RestrictionState,
    };
    pub use crate::position::{estimate_track_position, try_estimate_track_position, ResolvedPosition};
    pub use crate::region::describe_region;
    pub use crate::resolver::{
        find_nearest_station, find_upcoming_landmarks, stations_within, LandmarkHit, StationMatch,
    };
    pub use crate::source::{
        subscribe, IpFallbackSource, LocationSource, SimulatedSource, SourceMode, SourceSet,
        SubscribeOptions, Subscription,
    };
    pub use crate::spatial::haversine_distance;
}

pub use prelude::*;
