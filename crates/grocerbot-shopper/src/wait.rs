//! Waiting for asynchronous page updates.
//!
//! The storefront exposes no network-idle or mutation signal, so every call
//! site names a [`Pause`] bucket sized to the update it expects. A
//! [`WaitStrategy`] decides what to do with it: [`FixedWait`] sleeps the whole
//! bucket, [`PollUntilPresent`] returns as soon as a ready selector shows up
//! and treats the bucket as its timeout.

use std::time::Duration;

use async_trait::async_trait;
use grocerbot_protocols::{DriverError, PageDriver};
use tracing::{debug, trace};

/// Duration buckets, from a quick re-render to a full login round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pause {
    Nano,
    Mini,
    Short,
    Mid,
    Long,
    Xlong,
}

impl Pause {
    pub const fn duration(self) -> Duration {
        match self {
            Pause::Nano => Duration::from_millis(500),
            Pause::Mini => Duration::from_millis(1_000),
            Pause::Short => Duration::from_millis(2_000),
            Pause::Mid => Duration::from_millis(4_000),
            Pause::Long => Duration::from_millis(10_000),
            Pause::Xlong => Duration::from_millis(12_000),
        }
    }
}

/// How to wait for the page after an interaction.
#[async_trait]
pub trait WaitStrategy: Send + Sync {
    /// Wait up to `pause` for the page to settle.
    ///
    /// `ready` names an element whose presence means the update has landed.
    /// Timing out is not an error: the next interaction reports whatever is
    /// actually missing.
    async fn wait(
        &self,
        driver: &dyn PageDriver,
        pause: Pause,
        ready: Option<&str>,
    ) -> Result<(), DriverError>;
}

/// Always sleep the full bucket.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedWait;

#[async_trait]
impl WaitStrategy for FixedWait {
    async fn wait(
        &self,
        driver: &dyn PageDriver,
        pause: Pause,
        _ready: Option<&str>,
    ) -> Result<(), DriverError> {
        driver.pause(pause.duration()).await
    }
}

/// Poll for the ready selector, falling back to a fixed sleep without one.
#[derive(Debug, Clone, Copy)]
pub struct PollUntilPresent {
    interval: Duration,
}

impl PollUntilPresent {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(250);

    /// A zero interval is bumped to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for PollUntilPresent {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

#[async_trait]
impl WaitStrategy for PollUntilPresent {
    async fn wait(
        &self,
        driver: &dyn PageDriver,
        pause: Pause,
        ready: Option<&str>,
    ) -> Result<(), DriverError> {
        let Some(selector) = ready else {
            return driver.pause(pause.duration()).await;
        };

        // Budget counts paused time only.
        let timeout = pause.duration();
        let mut waited = Duration::ZERO;
        loop {
            if driver.element_exists(selector).await? {
                trace!("{} present after {:?}", selector, waited);
                return Ok(());
            }
            if waited >= timeout {
                debug!("{} still absent after {:?}", selector, timeout);
                return Ok(());
            }
            let step = self.interval.min(timeout - waited);
            driver.pause(step).await?;
            waited += step;
        }
    }
}

#[cfg(test)]
#[path = "wait_tests.rs"]
mod tests;
