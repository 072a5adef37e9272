//! Coarse IP-geolocation fallback.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::config::LocatorConfig;
use crate::models::types::{PositionFix, Result};
use crate::source::LocationSource;

/// Re-tags fixes from a coarse geolocation lookup as IP-fallback fixes.
///
/// Whatever accuracy the inner source reports is replaced with the
/// configured fallback accuracy, so downstream lock classification always
/// reports no fix and consumers can show degraded provenance.
pub struct IpFallbackSource {
    inner: Arc<dyn LocationSource>,
    config: LocatorConfig,
}

impl IpFallbackSource {
    pub fn new(inner: Arc<dyn LocationSource>, config: LocatorConfig) -> Self {
        Self { inner, config }
    }
}

impl LocationSource for IpFallbackSource {
    fn next_fix<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<PositionFix>> + Send + 'a>> {
        Box::pin(async move {
            let coarse = self.inner.next_fix().await?;
            Ok(PositionFix::ip_fallback(
                coarse.coordinate,
                coarse.timestamp_ms,
                &self.config,
            ))
        })
    }
}
