// Shutdown Coordinator
//
// Running -> StopAccepting -> Draining -> Terminated.
// Jobs still buffered or running when the drain timeout expires are abandoned.

mod token;

pub use token::{shutdown_channel, ShutdownPhase, ShutdownSender, ShutdownToken};

use crate::application::job_queue::JobQueue;
use crate::application::worker::{WorkerPool, WorkerReport};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info};

/// How the drain ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every worker observed the closed, empty queue and exited in time
    Clean { reports: Vec<WorkerReport> },
    /// The drain timeout expired first; outstanding work was abandoned
    Forced {
        /// Jobs still buffered when the timeout fired
        abandoned_jobs: usize,
        /// Workers still running (each possibly mid-job) when the timeout fired
        workers_aborted: usize,
    },
}

impl ShutdownOutcome {
    pub fn is_clean(&self) -> bool {
        matches!(self, ShutdownOutcome::Clean { .. })
    }
}

/// Drives the shutdown sequence for one queue and its worker pool
pub struct ShutdownCoordinator {
    queue: Arc<JobQueue>,
    drain_timeout: Duration,
    sender: ShutdownSender,
}

impl ShutdownCoordinator {
    pub fn new(queue: Arc<JobQueue>, drain_timeout: Duration) -> Self {
        let (sender, _) = shutdown_channel();
        Self {
            queue,
            drain_timeout,
            sender,
        }
    }

    /// Token for adapters that must stop admitting work
    pub fn token(&self) -> ShutdownToken {
        self.sender.token()
    }

    pub fn phase(&self) -> ShutdownPhase {
        self.sender.phase()
    }

    /// Wait for `signal`, then run the shutdown sequence
    pub async fn run<S>(&self, signal: S, pool: WorkerPool) -> ShutdownOutcome
    where
        S: Future<Output = ()>,
    {
        signal.await;
        info!("Termination signal received, shutting down");
        self.shutdown(pool).await
    }

    /// Run the shutdown sequence now
    pub async fn shutdown(&self, mut pool: WorkerPool) -> ShutdownOutcome {
        self.sender.advance(ShutdownPhase::StopAccepting);
        info!(phase = %ShutdownPhase::StopAccepting, "No longer admitting new jobs");

        self.sender.advance(ShutdownPhase::Draining);
        self.queue.close();
        info!(
            phase = %ShutdownPhase::Draining,
            buffered = self.queue.len(),
            workers = pool.running(),
            timeout_ms = self.drain_timeout.as_millis() as u64,
            "Waiting for workers to drain the queue"
        );

        let started = Instant::now();
        let drained = match tokio::time::timeout(self.drain_timeout, pool.join()).await {
            Ok(reports) => Some(reports),
            Err(_) => settle(&mut pool).await,
        };

        let outcome = match drained {
            Some(reports) => {
                let total: u64 = reports.iter().map(WorkerReport::total).sum();
                info!(
                    jobs = total,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Workers drained the queue, clean shutdown"
                );
                ShutdownOutcome::Clean { reports }
            }
            None => {
                let abandoned_jobs = self.queue.len();
                let workers_aborted = pool.abort();
                error!(
                    abandoned_jobs,
                    workers_aborted,
                    timeout_ms = self.drain_timeout.as_millis() as u64,
                    "Drain timeout elapsed, forcing unclean shutdown; outstanding jobs are lost"
                );
                ShutdownOutcome::Forced {
                    abandoned_jobs,
                    workers_aborted,
                }
            }
        };

        self.sender.advance(ShutdownPhase::Terminated);
        info!(phase = %ShutdownPhase::Terminated, "Shutdown complete");
        outcome
    }
}

/// Scheduler turns granted to workers whose last job ended on the deadline tick
const SETTLE_POLLS: usize = 16;

/// Last look at the pool once the drain deadline has fired
///
/// A job that ends exactly at the deadline still needs its worker to observe
/// the closed queue and exit. Only workers that are still busy after a few
/// scheduler turns count as unfinished.
async fn settle(pool: &mut WorkerPool) -> Option<Vec<WorkerReport>> {
    let turns = async {
        for _ in 0..SETTLE_POLLS {
            tokio::task::yield_now().await;
        }
    };

    tokio::select! {
        biased;
        reports = pool.join() => Some(reports),
        _ = turns => None,
    }
}
