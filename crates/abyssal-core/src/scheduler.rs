//! Wall-clock tick scheduling.
//!
//! Ticks run on fixed wall-clock boundaries: with a 60 second interval
//! they fire at :00 of every minute, regardless of when the process
//! started or how long the previous tick took. After each tick the
//! scheduler realigns against the clock, so a slow tick shortens the
//! following wait instead of drifting the boundary.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::{info, warn};

use crate::orchestrator::TickEngine;
use crate::store::WorldStore;

/// Errors that can occur while scheduling ticks.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The tick interval must be at least one second.
    #[error("tick interval must be non-zero")]
    ZeroInterval,

    /// The system clock reports a time before the Unix epoch.
    #[error("system clock is before the Unix epoch")]
    ClockSkew,
}

/// Milliseconds until the next interval boundary.
///
/// Always in `1..=interval_ms`: when the clock sits exactly on a boundary
/// the full interval is returned, so a tick never fires twice on one
/// boundary. A zero interval yields a zero delay.
#[must_use]
pub const fn delay_until_boundary(interval_ms: u64, now_ms: u64) -> u64 {
    match now_ms.checked_rem(interval_ms) {
        Some(rem) => interval_ms.saturating_sub(rem),
        None => 0,
    }
}

/// Runs a [`TickEngine`] on wall-clock boundaries.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    interval_ms: u64,
    max_ticks: Option<u64>,
}

impl Scheduler {
    /// Create a scheduler firing every `interval_secs` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::ZeroInterval`] for a zero interval.
    pub const fn new(interval_secs: u64) -> Result<Self, SchedulerError> {
        if interval_secs == 0 {
            return Err(SchedulerError::ZeroInterval);
        }
        Ok(Self {
            interval_ms: interval_secs.saturating_mul(1000),
            max_ticks: None,
        })
    }

    /// Stop after `max_ticks` boundaries. Used by tests and bounded runs.
    #[must_use]
    pub const fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Run the engine until the tick bound is reached (forever without one).
    ///
    /// A failed tick is logged and skipped; the world stays as the last
    /// successful tick left it and the scheduler realigns for the next
    /// boundary.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::ClockSkew`] if the system clock reports
    /// a time before the Unix epoch.
    pub async fn run<S: WorldStore>(
        &self,
        engine: &mut TickEngine<S>,
    ) -> Result<(), SchedulerError> {
        let mut fired = 0u64;
        loop {
            if let Some(max) = self.max_ticks {
                if fired >= max {
                    info!(ticks = fired, "Scheduler reached its tick bound");
                    return Ok(());
                }
            }

            let delay = delay_until_boundary(self.interval_ms, now_unix_ms()?);
            tokio::time::sleep(Duration::from_millis(delay)).await;

            match engine.run_tick().await {
                Ok(summary) => info!(
                    tick = summary.tick,
                    orders_completed = summary.orders_completed,
                    engagements = summary.reports.len(),
                    "Tick complete"
                ),
                Err(err) => warn!(%err, "Tick failed, skipping to next boundary"),
            }
            fired = fired.saturating_add(1);
        }
    }
}

/// Current wall-clock time as milliseconds since the Unix epoch.
fn now_unix_ms() -> Result<u64, SchedulerError> {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| SchedulerError::ClockSkew)?;
    Ok(u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX))
}
