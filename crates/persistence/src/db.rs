//! PostgreSQL pool setup and liveness probe.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::{Duration, Instant};
use tracing::info;

/// Pool settings, decoupled from the api crate's config types.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections.min(self.max_connections))
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
    }
}

/// Connects eagerly so a bad URL fails at startup.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = config.options().connect(&config.url).await?;
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database pool ready"
    );
    Ok(pool)
}

/// Round-trips `SELECT 1`; returns the latency on success.
pub async fn ping(pool: &PgPool) -> Result<Duration, sqlx::Error> {
    let start = Instant::now();
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_connections_capped_by_max() {
        let config = DatabaseConfig {
            url: "postgres://localhost/unused".to_string(),
            max_connections: 2,
            min_connections: 0,
            connect_timeout_secs: 1,
            idle_timeout_secs: 60,
        };
        // lazy pools still need a runtime for their maintenance task
        tokio_test::block_on(async {
            let pool = config.options().connect_lazy(&config.url).unwrap();
            assert_eq!(pool.size(), 0);
        });
    }
}
