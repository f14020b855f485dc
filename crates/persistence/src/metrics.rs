//! Query timing and connection pool gauges.

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::{Duration, Instant};
use tracing::warn;

/// Queries slower than this are logged as well as recorded.
pub const SLOW_QUERY_THRESHOLD: Duration = Duration::from_millis(500);

/// Times a single repository query.
///
/// ```ignore
/// let timer = QueryTimer::new("find_blog_by_slug");
/// let result = sqlx::query_as::<_, BlogEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// result
/// ```
pub struct QueryTimer {
    query: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query: &'static str) -> Self {
        Self {
            query,
            start: Instant::now(),
        }
    }

    /// Records the elapsed time and returns it.
    pub fn record(self) -> Duration {
        let elapsed = self.start.elapsed();
        histogram!("db_query_duration_seconds", "query" => self.query)
            .record(elapsed.as_secs_f64());

        if elapsed >= SLOW_QUERY_THRESHOLD {
            counter!("db_slow_queries_total", "query" => self.query).increment(1);
            warn!(
                query = self.query,
                elapsed_ms = elapsed.as_millis() as u64,
                "Slow database query"
            );
        }
        elapsed
    }
}

/// Publishes size, idle and in-use connection counts for `pool`.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size();
    let idle = pool.num_idle() as u32;

    gauge!("db_pool_connections", "state" => "total").set(f64::from(size));
    gauge!("db_pool_connections", "state" => "idle").set(f64::from(idle));
    gauge!("db_pool_connections", "state" => "in_use").set(f64::from(size.saturating_sub(idle)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_returns_elapsed() {
        let timer = QueryTimer::new("noop");
        std::thread::sleep(Duration::from_millis(2));
        assert!(timer.record() >= Duration::from_millis(2));
    }

    #[test]
    fn test_timer_keeps_query_label() {
        let timer = QueryTimer::new("list_published_blogs");
        assert_eq!(timer.query, "list_published_blogs");
    }
}
