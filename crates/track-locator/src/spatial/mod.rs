//! Spatial indexing and distance utilities.

pub mod index;
pub mod queries;

pub use queries::{haversine_distance, initial_bearing, EARTH_RADIUS_M};
