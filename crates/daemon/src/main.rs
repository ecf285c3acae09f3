//! Jobgate - Main Entry Point
//! HTTP admission endpoint + bounded job queue + fixed worker pool

mod config;
mod logging;
mod signal;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

// Import workspace crates
use jobgate_api_http::HttpServer;
use jobgate_core::application::{AdmissionService, JobQueue, ShutdownCoordinator, WorkerPool};
use jobgate_infra_system::SimulatedExecutor;

use crate::config::DaemonConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Grace period for in-flight HTTP requests once the engine has stopped
const SERVER_STOP_GRACE: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // 1. Load configuration
    let config = DaemonConfig::parse();

    // 2. Initialize logging (guard flushes buffered lines on exit)
    let _log_guard = logging::init_logging(config.log_format)?;

    info!("Jobgate v{} starting...", VERSION);

    // 3. Validate engine settings before accepting any traffic
    let engine = config
        .engine_config()
        .context("Invalid engine configuration")?;
    info!(
        queue_capacity = engine.queue_capacity,
        workers = engine.workers,
        job_duration_ms = engine.job_duration.as_millis() as u64,
        drain_timeout_ms = engine.drain_timeout.as_millis() as u64,
        push_policy = ?engine.push_policy,
        "Engine configuration loaded"
    );

    // 4. Setup dependencies (DI wiring)
    let queue = Arc::new(JobQueue::from_config(&engine));
    let executor = Arc::new(SimulatedExecutor::new(engine.job_duration));
    let coordinator = ShutdownCoordinator::new(Arc::clone(&queue), engine.drain_timeout);

    // 5. Start HTTP admission endpoint
    info!("Starting HTTP server...");
    let server = HttpServer::new(
        config.http_config(),
        AdmissionService::new(Arc::clone(&queue)),
        coordinator.token(),
    )
    .start()
    .await
    .map_err(|e| anyhow::anyhow!("HTTP server start failed: {}", e))?;

    // 6. Start worker pool
    info!("Starting worker pool...");
    let pool = WorkerPool::spawn(engine.workers, Arc::clone(&queue), executor);

    info!(addr = %server.local_addr(), "System ready. Waiting for jobs...");
    info!("Press Ctrl+C to shutdown");

    // 7. Wait for a termination signal, then stop admissions and drain
    let outcome = coordinator.run(signal::termination_signal(), pool).await;

    // 8. Let in-flight HTTP requests finish
    match tokio::time::timeout(SERVER_STOP_GRACE, server.stopped()).await {
        Ok(Ok(())) => info!("HTTP server stopped"),
        Ok(Err(e)) => warn!(error = %e, "HTTP server stopped with error"),
        Err(_) => warn!("HTTP server did not stop within grace period, abandoning connections"),
    }

    if outcome.is_clean() {
        info!("Shutdown complete.");
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
