//! Periodic polling with last-wins delivery.
//!
//! Fixes are published into a `watch` channel, so a consumer that falls
//! behind only ever sees the most recent fix. There is no queue and no
//! backpressure.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::models::types::{LocatorError, PositionFix, Result};
use crate::source::{LocationSource, SourceMode};

/// The sources a subscription may poll
#[derive(Clone, Default)]
pub struct SourceSet {
    pub live: Option<Arc<dyn LocationSource>>,
    pub fallback: Option<Arc<dyn LocationSource>>,
}

/// Polling cadence and source selection for [`subscribe`].
///
/// `fix_timeout` bounds every source call, fallback included, so one tick
/// never outlasts twice the timeout.
#[derive(Clone, Copy, Debug)]
pub struct SubscribeOptions {
    pub mode: SourceMode,
    /// Time between polls
    pub interval: Duration,
    /// How long any single source may take to produce a fix
    pub fix_timeout: Duration,
}

impl Default for SubscribeOptions {
    fn default() -> Self {
        Self {
            mode: SourceMode::Live,
            interval: Duration::from_secs(1),
            fix_timeout: Duration::from_secs(30),
        }
    }
}

/// Handle to a running location subscription.
///
/// Dropping the handle stops polling.
pub struct Subscription {
    receiver: watch::Receiver<Option<PositionFix>>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Most recent fix, if any has arrived
    pub fn latest(&self) -> Option<PositionFix> {
        self.receiver.borrow().clone()
    }

    /// Wait for a fix newer than the last one returned.
    ///
    /// Returns `None` once the polling task has stopped.
    pub async fn next(&mut self) -> Option<PositionFix> {
        self.receiver.changed().await.ok()?;
        self.receiver.borrow_and_update().clone()
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop polling. Nothing else needs releasing.
    pub fn unsubscribe(self) {
        self.task.abort();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start polling `sources` according to `options`.
///
/// Must be called inside a tokio runtime. Fails with
/// [`LocatorError::SourceUnavailable`] if the mode needs a source that was
/// not supplied.
pub fn subscribe(sources: SourceSet, options: SubscribeOptions) -> Result<Subscription> {
    let primary = match options.mode {
        SourceMode::Live => sources.live.clone(),
        SourceMode::FallbackSimulated => sources.fallback.clone(),
    }
    .ok_or_else(|| {
        LocatorError::SourceUnavailable(format!("no source configured for {:?} mode", options.mode))
    })?;

    let fallback = match options.mode {
        SourceMode::Live => sources.fallback,
        SourceMode::FallbackSimulated => None,
    };

    let (sender, receiver) = watch::channel(None);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(options.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = sender.closed() => break,
                _ = ticker.tick() => {}
            }

            match poll_once(primary.as_ref(), fallback.as_deref(), options.fix_timeout).await {
                Ok(fix) => {
                    if sender.send(Some(fix)).is_err() {
                        break;
                    }
                }
                Err(err) => tracing::warn!(error = %err, "no position fix this tick"),
            }
        }

        tracing::debug!("location subscription stopped");
    });

    Ok(Subscription { receiver, task })
}

async fn poll_once(
    primary: &dyn LocationSource,
    fallback: Option<&dyn LocationSource>,
    timeout: Duration,
) -> Result<PositionFix> {
    let live = fix_within(primary, timeout).await;

    match (live, fallback) {
        (Ok(fix), _) => Ok(fix),
        (Err(err), Some(fallback)) => {
            tracing::warn!(error = %err, "primary location source failed, trying fallback");
            fix_within(fallback, timeout).await
        }
        (Err(err), None) => Err(err),
    }
}

/// A source that never answers must not stall the polling loop
async fn fix_within(source: &dyn LocationSource, timeout: Duration) -> Result<PositionFix> {
    match tokio::time::timeout(timeout, source.next_fix()).await {
        Ok(result) => result,
        Err(_) => Err(LocatorError::SourceUnavailable(format!(
            "no fix within {} ms",
            timeout.as_millis()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocatorConfig;
    use crate::models::types::{Coordinate, FixProvenance};
    use crate::source::IpFallbackSource;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

    /// Emits fixes stamped with a poll counter, or fails every time
    struct CountingSource {
        polls: AtomicI64,
        fail: AtomicBool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                polls: AtomicI64::new(0),
                fail: AtomicBool::new(fail),
            })
        }

        fn set_failing(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        fn polls(&self) -> i64 {
            self.polls.load(Ordering::SeqCst)
        }
    }

    impl LocationSource for CountingSource {
        fn next_fix<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<PositionFix>> + Send + 'a>> {
            Box::pin(async move {
                let n = self.polls.fetch_add(1, Ordering::SeqCst);
                if self.fail.load(Ordering::SeqCst) {
                    Err(LocatorError::SourceUnavailable("receiver offline".into()))
                } else {
                    Ok(PositionFix::new(Coordinate::new(11.0, 76.96), 5.0, n))
                }
            })
        }
    }

    /// Never produces a fix, like a hung HTTP lookup
    struct HungSource;

    impl LocationSource for HungSource {
        fn next_fix<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<PositionFix>> + Send + 'a>> {
            Box::pin(std::future::pending())
        }
    }

    /// Answers only after `delay`
    struct SlowSource {
        delay: Duration,
    }

    impl LocationSource for SlowSource {
        fn next_fix<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<PositionFix>> + Send + 'a>> {
            Box::pin(async move {
                tokio::time::sleep(self.delay).await;
                Ok(PositionFix::new(Coordinate::new(11.0, 76.96), 5.0, 0))
            })
        }
    }

    fn options(mode: SourceMode) -> SubscribeOptions {
        SubscribeOptions {
            mode,
            interval: Duration::from_secs(1),
            fix_timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_fixes_delivered() {
        let live = CountingSource::new(false);
        let mut sub = subscribe(
            SourceSet {
                live: Some(live.clone()),
                fallback: None,
            },
            options(SourceMode::Live),
        )
        .unwrap();

        let fix = sub.next().await.unwrap();
        assert_eq!(fix.provenance, FixProvenance::Gnss);
        assert!(sub.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_live_uses_fallback() {
        let live = CountingSource::new(true);
        let coarse = CountingSource::new(false);
        let fallback = Arc::new(IpFallbackSource::new(coarse, LocatorConfig::default()));

        let mut sub = subscribe(
            SourceSet {
                live: Some(live.clone()),
                fallback: Some(fallback),
            },
            options(SourceMode::Live),
        )
        .unwrap();

        let fix = sub.next().await.unwrap();
        assert!(fix.is_fallback());
        assert_eq!(fix.accuracy_m, 5_000.0);
        assert!(live.polls() >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_source_for_mode() {
        let result = subscribe(
            SourceSet {
                live: Some(CountingSource::new(false)),
                fallback: None,
            },
            options(SourceMode::FallbackSimulated),
        );

        assert!(matches!(result, Err(LocatorError::SourceUnavailable(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_mode_ignores_live() {
        let live = CountingSource::new(false);
        let simulated = CountingSource::new(false);

        let mut sub = subscribe(
            SourceSet {
                live: Some(live.clone()),
                fallback: Some(simulated.clone()),
            },
            options(SourceMode::FallbackSimulated),
        )
        .unwrap();

        sub.next().await.unwrap();
        assert_eq!(live.polls(), 0);
        assert!(simulated.polls() >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_consumer_sees_latest() {
        let live = CountingSource::new(false);
        let sub = subscribe(
            SourceSet {
                live: Some(live.clone()),
                fallback: None,
            },
            options(SourceMode::Live),
        )
        .unwrap();

        tokio::time::sleep(Duration::from_millis(5_500)).await;

        let latest = sub.latest().unwrap();
        assert!(live.polls() >= 5);
        assert_eq!(latest.timestamp_ms, live.polls() - 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsubscribe_stops_polling() {
        let live = CountingSource::new(false);
        let sub = subscribe(
            SourceSet {
                live: Some(live.clone()),
                fallback: None,
            },
            options(SourceMode::Live),
        )
        .unwrap();

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        sub.unsubscribe();
        tokio::task::yield_now().await;

        let polls = live.polls();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(live.polls(), polls);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_live_times_out_to_fallback() {
        let live = Arc::new(SlowSource {
            delay: Duration::from_secs(60),
        });
        let coarse = CountingSource::new(false);
        let fallback = Arc::new(IpFallbackSource::new(coarse.clone(), LocatorConfig::default()));

        let mut sub = subscribe(
            SourceSet {
                live: Some(live),
                fallback: Some(fallback),
            },
            options(SourceMode::Live),
        )
        .unwrap();

        let started = tokio::time::Instant::now();
        let fix = sub.next().await.unwrap();

        assert!(fix.is_fallback());
        assert_eq!(fix.accuracy_m, 5_000.0);
        assert_eq!(coarse.polls(), 1);
        // Delivered once the 5 s fix timeout expired, not after the 60 s delay
        assert!(started.elapsed() >= Duration::from_secs(5));
        assert!(started.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_fallback_does_not_stall_polling() {
        let live = CountingSource::new(true);
        let mut sub = subscribe(
            SourceSet {
                live: Some(live.clone()),
                fallback: Some(Arc::new(HungSource)),
            },
            options(SourceMode::Live),
        )
        .unwrap();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(sub.latest().is_none());
        live.set_failing(false);

        let fix = tokio::time::timeout(Duration::from_secs(30), sub.next())
            .await
            .expect("polling resumed after the fallback timed out")
            .unwrap();

        assert_eq!(fix.provenance, FixProvenance::Gnss);
        assert!(live.polls() >= 2);
        assert!(sub.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_once_bounds_both_sources() {
        let result = poll_once(&HungSource, Some(&HungSource), Duration::from_secs(5)).await;
        assert!(matches!(result, Err(LocatorError::SourceUnavailable(_))));
    }
}
