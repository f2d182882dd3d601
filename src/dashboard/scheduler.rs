//! Periodic refresh trigger.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

/// Calls a cycle function on a fixed period until shut down.
///
/// The first cycle starts immediately. A cycle that overruns the period
/// delays the next tick instead of triggering a burst of catch-up cycles.
pub struct RefreshScheduler {
    period: Duration,
    max_cycles: Option<u64>,
}

impl RefreshScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            max_cycles: None,
        }
    }

    /// Stop on its own after `cycles` runs
    pub fn with_max_cycles(mut self, cycles: u64) -> Self {
        self.max_cycles = Some(cycles);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run until `shutdown` resolves or the cycle limit is reached.
    ///
    /// Shutdown during a cycle drops the in-flight work. Returns the number
    /// of cycles started.
    pub async fn run<F, Fut, S>(&self, mut cycle: F, shutdown: S) -> u64
    where
        F: FnMut(u64) -> Fut,
        Fut: Future<Output = ()>,
        S: Future<Output = ()>,
    {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut started = 0u64;
        loop {
            if self.max_cycles.is_some_and(|max| started >= max) {
                break;
            }

            tokio::select! {
                _ = &mut shutdown => {
                    info!("Refresh stopped after {} cycles", started);
                    break;
                }
                _ = ticker.tick() => {
                    started += 1;
                    tokio::select! {
                        _ = cycle(started) => {}
                        _ = &mut shutdown => {
                            info!("Refresh stopped during cycle {}", started);
                            break;
                        }
                    }
                }
            }
        }

        started
    }
}
