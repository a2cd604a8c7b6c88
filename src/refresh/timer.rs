//! Cancellable repeating timer
//!
//! Arming spawns a task that runs a tick callback once per period, the first
//! tick one full period after arming. The task stops as soon as the timer is
//! cancelled or dropped, including mid-tick.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Handle to an armed timer task
#[derive(Debug)]
pub struct RefreshTimer {
    period: Duration,
    cancel_token: CancellationToken,
    task: JoinHandle<()>,
}

impl RefreshTimer {
    /// Spawn the timer task; must be called from within a Tokio runtime
    pub fn arm<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            // A slow tick pushes the schedule back instead of bursting to catch up
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {}
                }

                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = tick() => {}
                }
            }

            log::debug!("Refresh timer stopped");
        });

        log::debug!("Refresh timer armed every {:?}", period);

        Self {
            period,
            cancel_token,
            task,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Stop the timer; idempotent
    pub fn cancel(&self) {
        self.cancel_token.cancel();
        self.task.abort();
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
