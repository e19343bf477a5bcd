//! Inter-call pacing for the external rate limit.
//!
//! Every remote visual call is preceded by one `Pacer::pause`. The default interval of
//! 1100 ms keeps the run under ~55 requests per minute.

use std::time::Duration;

use async_trait::async_trait;

pub const DEFAULT_CALL_INTERVAL: Duration = Duration::from_millis(1100);

#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Sleeps on the tokio clock, so paused-time tests advance it instantly.
pub struct TokioPacer {
    interval: Duration,
}

impl TokioPacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for TokioPacer {
    fn default() -> Self {
        Self::new(DEFAULT_CALL_INTERVAL)
    }
}

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self) {
        tokio::time::sleep(self.interval).await;
    }
}
