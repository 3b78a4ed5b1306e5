//! Fixed-interval polling on top of [`AsyncResource`].
//!
//! A [`PollingSource`] owns one resource and a ticker task. Activation
//! performs an immediate fetch and then refreshes on every interval tick
//! until deactivation, which both stops the ticker and detaches the resource
//! so a straggling tick or in-flight response can never write state. A failed
//! poll surfaces as a transient error and never stops future ticks.

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::resource::{AsyncResource, AsyncState};

/// Default poll interval for the agent status source.
pub const DEFAULT_STATUS_INTERVAL: Duration = Duration::from_secs(30);

/// A data source re-fetched on a fixed timer.
pub struct PollingSource<T> {
    resource: AsyncResource<T>,
    interval: Duration,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Clone + Send + 'static> PollingSource<T> {
    /// Create an inactive polling source around a resource.
    pub fn new(resource: AsyncResource<T>, interval: Duration) -> Self {
        Self {
            resource,
            interval,
            ticker: Mutex::new(None),
        }
    }

    /// Name of the underlying resource.
    pub fn name(&self) -> &str {
        self.resource.name()
    }

    /// Current state snapshot of the underlying resource.
    pub fn state(&self) -> AsyncState<T> {
        self.resource.state()
    }

    /// Handle to the underlying resource.
    pub fn resource(&self) -> &AsyncResource<T> {
        &self.resource
    }

    /// Start polling: immediate fetch, then one refresh per interval tick.
    ///
    /// No-op if already active. Each tick starts a new generation; an
    /// overlapping slow response from an earlier tick loses the generation
    /// check inside the resource.
    pub fn activate(&self) {
        let mut guard = self.ticker.lock().expect("ticker lock poisoned");
        if guard.is_some() {
            return;
        }

        let resource = self.resource.clone();
        let interval = self.interval;
        debug!(source = %self.resource.name(), ?interval, "polling activated");
        *guard = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick fires immediately; a stalled tick slot is delayed
            // rather than burst-replayed.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !resource.is_live() {
                    break;
                }
                resource.refresh();
            }
        }));
    }

    /// Stop the ticker and detach the resource.
    ///
    /// Unconditional on every exit path (also runs on Drop). After this
    /// returns, no tick fires and no in-flight result is applied.
    pub fn deactivate(&self) {
        if let Some(handle) = self.ticker.lock().expect("ticker lock poisoned").take() {
            handle.abort();
        }
        self.resource.detach();
    }

    /// Returns true while the ticker task is installed.
    pub fn is_active(&self) -> bool {
        self.ticker.lock().expect("ticker lock poisoned").is_some()
    }

    /// Trigger an out-of-band refresh (manual retry affordance).
    pub fn refresh_now(&self) {
        if !self.resource.is_live() {
            warn!(source = %self.resource.name(), "refresh requested on detached source");
            return;
        }
        self.resource.refresh();
    }
}

impl<T> Drop for PollingSource<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.ticker.lock().expect("ticker lock poisoned").take() {
            handle.abort();
        }
        self.resource.detach();
    }
}
