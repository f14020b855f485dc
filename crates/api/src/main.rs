use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use portfolio_api::app::AppState;
use portfolio_api::config::Config;
use portfolio_api::jobs::{JobScheduler, PoolMetricsJob, RateLimiterPruneJob, SessionCleanupJob};
use portfolio_api::middleware::{init_metrics, logging::init_logging};
use portfolio_api::services::admin_bootstrap::{bootstrap_admin, BootstrapOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    init_logging(&config.logging);
    if let Err(e) = init_metrics() {
        warn!(error = %e, "Prometheus recorder not installed; /metrics will be empty");
    }

    info!("Starting portfolio API v{}", env!("CARGO_PKG_VERSION"));

    let pool = persistence::db::create_pool(&(&config.database).into()).await?;

    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    match bootstrap_admin(&pool, &config.admin).await? {
        BootstrapOutcome::Created => info!("Admin account bootstrapped"),
        BootstrapOutcome::AlreadyExists | BootstrapOutcome::NotConfigured => {}
    }

    let addr = config.socket_addr()?;
    let state = AppState::new(config, pool.clone());

    let mut scheduler = JobScheduler::new();
    scheduler.register(SessionCleanupJob::new(
        pool.clone(),
        state.config.limits.session_cleanup_interval_minutes,
    ));
    scheduler.register(PoolMetricsJob::new(pool));
    if let Some(limiter) = &state.rate_limiter {
        scheduler.register(RateLimiterPruneJob::new(Arc::clone(limiter)));
    }
    scheduler.start();

    let app = portfolio_api::app::build_router(state);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    scheduler.shutdown();
    scheduler.wait_for_shutdown(Duration::from_secs(10)).await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
