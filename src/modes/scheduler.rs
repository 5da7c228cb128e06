//! Fixed-delay tick scheduling
//!
//! Wraps an optional [`tokio::time::Interval`]. Stopping drops the interval
//! so no tick can fire afterwards; starting always builds a new one whose
//! first tick lies a full period ahead.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::debug;

pub struct TickScheduler {
    period: Duration,
    timer: Option<Interval>,
}

impl TickScheduler {
    /// A stopped scheduler
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            timer: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Begin ticking, replacing any schedule already running
    pub fn start(&mut self) {
        let mut timer = interval_at(Instant::now() + self.period, self.period);
        // A late tick pushes the following ones back instead of bursting
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
        debug!(period_ms = self.period.as_millis() as u64, "scheduler started");
    }

    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            debug!("scheduler stopped");
        }
    }

    /// Wait for the next tick. Never resolves while stopped.
    ///
    /// Cancel-safe, so it can sit in a `tokio::select!` branch.
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
