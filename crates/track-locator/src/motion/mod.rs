//! GPS lock quality, drift detection and speed-restriction compliance.

pub mod drift;
pub mod evaluator;
pub mod lock;
pub mod restriction;

pub use drift::{DriftCheck, DriftDetector};
pub use evaluator::{MotionEvaluator, MotionReport};
pub use lock::classify_lock;
pub use restriction::{classify_severity, evaluate_restriction, RestrictionState};
