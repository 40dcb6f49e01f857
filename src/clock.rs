//! Time source for retry delays and the watch loop
//!
//! Anything that sleeps or measures elapsed time goes through [`Clock`] so
//! tests can drive timeouts without waiting on the wall clock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Monotonic time, wall time and sleeping
#[async_trait]
pub trait Clock: Send + Sync {
    /// Monotonic instant used for elapsed-time measurements
    fn now(&self) -> Instant;

    /// Current wall-clock time (for display and rate-limit resets)
    fn wall_time(&self) -> DateTime<Utc>;

    /// Suspend for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Real clock backed by tokio's timer
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_time(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
