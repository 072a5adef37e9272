//! Pluggable location sources.
//!
//! The resolver itself never acquires fixes. External crates implement
//! [`LocationSource`] for real receivers or HTTP geolocation; this module
//! ships the simulated source, the IP-fallback adapter and a last-wins
//! subscription that drives either of them.

use std::future::Future;
use std::pin::Pin;

use crate::models::types::{PositionFix, Result};

pub mod fallback;
pub mod simulated;
pub mod subscription;

pub use fallback::IpFallbackSource;
pub use simulated::SimulatedSource;
pub use subscription::{subscribe, SourceSet, SubscribeOptions, Subscription};

/// Produce the next position fix
pub trait LocationSource: Send + Sync {
    fn next_fix<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<PositionFix>> + Send + 'a>>;
}

/// Which source a subscription polls first
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SourceMode {
    /// Poll the live receiver, falling back when it fails
    #[default]
    Live,
    /// Poll only the fallback (typically simulated) source
    FallbackSimulated,
}
