//! Station and landmark catalogs.

pub mod builtin;
pub mod static_catalog;

pub use static_catalog::{Landmark, Station, StaticFeatureCatalog};
