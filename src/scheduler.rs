//! Periodic tick timer that can be cancelled and rescheduled
//!
//! `tokio::time::Interval` cannot change its period, so the scheduler keeps
//! its own deadline and sleeps until it inside `tokio::select!`.

use std::time::Duration;
use tokio::time::{Instant, sleep_until};

use crate::game::Schedule;

#[derive(Debug, Default)]
pub struct TickScheduler {
    interval: Option<Duration>,
    deadline: Option<Instant>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, schedule: Schedule) {
        match schedule {
            Schedule::Keep => {}
            Schedule::Cancel => self.cancel(),
            Schedule::Restart(interval) => self.reschedule(interval),
        }
    }

    pub fn cancel(&mut self) {
        self.interval = None;
        self.deadline = None;
    }

    /// Drop the pending tick and fire the next one a full `interval` from now
    pub fn reschedule(&mut self, interval: Duration) {
        self.interval = Some(interval);
        self.deadline = Some(Instant::now() + interval);
    }

    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Wait for the next tick. Never resolves while cancelled.
    ///
    /// Cancellation safe: dropping the future before it resolves leaves the
    /// deadline untouched.
    pub async fn tick(&mut self) {
        let (Some(deadline), Some(interval)) = (self.deadline, self.interval) else {
            return std::future::pending().await;
        };

        sleep_until(deadline).await;

        let now = Instant::now();
        let next = deadline + interval;
        // Missed ticks are skipped rather than fired in a burst
        self.deadline = Some(if next <= now { now + interval } else { next });
    }
}
