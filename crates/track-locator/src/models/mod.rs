//! Position data models, types, and the catalog trait.

pub mod traits;
pub mod types;

// Re-exports for convenience
pub use traits::FeatureCatalog;
pub use types::{
    CatalogKind, Coordinate, FixProvenance, LandmarkKind, LocatorError, LockStatus, PositionFix,
    Result, Severity,
};
