//! Drops idle per-IP rate limiter buckets so the keyed map stays small.

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::scheduler::Job;
use crate::middleware::RateLimiterState;

pub struct RateLimiterPruneJob {
    limiter: Arc<RateLimiterState>,
}

impl RateLimiterPruneJob {
    pub fn new(limiter: Arc<RateLimiterState>) -> Self {
        Self { limiter }
    }
}

#[async_trait::async_trait]
impl Job for RateLimiterPruneJob {
    fn name(&self) -> &'static str {
        "rate_limiter_prune"
    }

    fn interval(&self) -> Duration {
        Duration::from_secs(300)
    }

    async fn execute(&self) -> anyhow::Result<()> {
        let before = self.limiter.len();
        self.limiter.retain_recent();
        debug!(before, after = self.limiter.len(), "Rate limiter buckets pruned");
        metrics::gauge!("rate_limiter_tracked_clients").set(self.limiter.len() as f64);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[tokio::test]
    async fn test_prune_keeps_limiter_usable() {
        let limiter = Arc::new(RateLimiterState::new(10).unwrap());
        limiter
            .check(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))
            .unwrap();
        assert_eq!(limiter.len(), 1);

        let job = RateLimiterPruneJob::new(Arc::clone(&limiter));
        tokio_test::assert_ok!(job.execute().await);

        // the bucket was just used, so it has not refilled yet
        assert_eq!(limiter.len(), 1);
        assert!(limiter.check(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2))).is_ok());
    }
}
