#![forbid(unsafe_code)]

use chrono::{DateTime, SubsecRound, Utc};
use std::time::{Duration, Instant};

#[async_trait::async_trait]
pub trait Clock: Send + Sync {
    /// Monotonic time, for pacing the poll loop.
    fn now(&self) -> Instant;
    /// Wall-clock time, for session timestamps. Whole seconds.
    fn wall(&self) -> DateTime<Utc>;
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default)]
pub struct SystemClock;

#[async_trait::async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(0)
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
