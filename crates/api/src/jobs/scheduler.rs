//! Interval scheduler for background jobs.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// A periodic background task.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    fn name(&self) -> &'static str;

    /// Time between runs. The first run happens one interval after start.
    fn interval(&self) -> Duration;

    async fn execute(&self) -> anyhow::Result<()>;
}

/// Runs registered jobs on their intervals until shut down.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            shutdown_tx,
            handles: Vec::new(),
        }
    }

    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn start(&mut self) {
        info!(jobs = self.jobs.len(), "Starting job scheduler");

        for job in &self.jobs {
            let job = Arc::clone(job);
            let shutdown_rx = self.shutdown_tx.subscribe();
            self.handles.push(tokio::spawn(run_job(job, shutdown_rx)));
        }
    }

    /// Signals every job loop to stop after its current run.
    pub fn shutdown(&self) {
        info!("Stopping job scheduler");
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn wait_for_shutdown(self, timeout: Duration) {
        let join_all = async {
            for handle in self.handles {
                if let Err(e) = handle.await {
                    warn!(error = %e, "Job task panicked");
                }
            }
        };

        match tokio::time::timeout(timeout, join_all).await {
            Ok(()) => info!("All jobs stopped"),
            Err(_) => warn!(timeout_secs = timeout.as_secs(), "Job shutdown timed out"),
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_job(job: Arc<dyn Job>, mut shutdown_rx: watch::Receiver<bool>) {
    let name = job.name();
    let mut interval = tokio::time::interval(job.interval());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // first tick completes immediately
    interval.tick().await;

    info!(job = name, interval_secs = job.interval().as_secs(), "Job scheduled");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let start = Instant::now();
                match job.execute().await {
                    Ok(()) => info!(
                        job = name,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Job completed"
                    ),
                    Err(e) => error!(
                        job = name,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        error = %e,
                        "Job failed"
                    ),
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    info!(job = name, "Job stopped");
                    break;
                }
            }
        }
    }
}
