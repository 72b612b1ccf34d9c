use crate::progress::{DEFAULT_TICK_MS, PROGRESS_CAP, PROGRESS_STEP};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Returns the value shown after one more tick
pub fn next_progress(current: u8) -> u8 {
    if current >= PROGRESS_CAP {
        return PROGRESS_CAP;
    }
    (current + PROGRESS_STEP).min(PROGRESS_CAP)
}

/// Spawns the repeating timer behind the progress indicator
#[derive(Debug, Clone, Copy)]
pub struct ProgressSimulator {
    period: Duration,
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TICK_MS))
    }
}

impl ProgressSimulator {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Starts ticking on the current tokio runtime
    ///
    /// `on_tick` receives the simulated percentage after each tick. The first
    /// tick fires one period after this call; the task finishes on its own
    /// once it reports [`PROGRESS_CAP`]. The timer runs until then or until
    /// the returned guard is stopped or dropped.
    pub fn start<F>(&self, mut on_tick: F) -> ProgressGuard
    where
        F: FnMut(u8) + Send + 'static,
    {
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut progress = 0;
            while progress < PROGRESS_CAP {
                ticker.tick().await;
                progress = next_progress(progress);
                tracing::trace!("progress tick: {}%", progress);
                on_tick(progress);
            }
        });

        ProgressGuard {
            handle: Some(handle),
        }
    }
}

/// Owns a running simulator; the timer cannot outlive it
#[derive(Debug)]
pub struct ProgressGuard {
    handle: Option<JoinHandle<()>>,
}

impl ProgressGuard {
    /// Stops the timer and waits until its task has ended
    ///
    /// No tick is delivered after this returns.
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            // Cancelled or already finished; either way the task is gone
            let _ = handle.await;
        }
    }

    /// Returns true once the timer task has ended
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }
}

impl Drop for ProgressGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
