//! Deletes expired login sessions in batches.

use persistence::repositories::UserRepository;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

use super::scheduler::Job;

const BATCH_SIZE: i64 = 1000;
/// Upper bound on batches per run so one run cannot hog the pool.
const MAX_BATCHES: usize = 50;

pub struct SessionCleanupJob {
    users: UserRepository,
    interval: Duration,
}

impl SessionCleanupJob {
    pub fn new(pool: PgPool, interval_minutes: u64) -> Self {
        Self {
            users: UserRepository::new(pool),
            interval: Duration::from_secs(interval_minutes.max(1) * 60),
        }
    }
}

#[async_trait::async_trait]
impl Job for SessionCleanupJob {
    fn name(&self) -> &'static str {
        "session_cleanup"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn execute(&self) -> anyhow::Result<()> {
        let mut total = 0u64;
        for _ in 0..MAX_BATCHES {
            let deleted = self.users.delete_expired_sessions(BATCH_SIZE).await?;
            total += deleted;
            if deleted < BATCH_SIZE as u64 {
                break;
            }
        }
        if total > 0 {
            info!(deleted = total, "Expired sessions removed");
        }
        metrics::counter!("sessions_expired_deleted_total").increment(total);
        Ok(())
    }
}
