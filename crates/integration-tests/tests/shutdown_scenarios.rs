//! Shutdown Scenarios
//!
//! Drain-or-force behaviour of the coordinator with the simulated executor.
//! All tests run on a paused clock, so "2 seconds per job" is exact.

use jobgate_core::application::{
    JobQueue, ShutdownCoordinator, ShutdownOutcome, ShutdownPhase, WorkerPool,
};
use jobgate_core::domain::{EngineConfig, Job, QueueState};
use jobgate_core::port::job_executor::mocks::{MockBehavior, MockJobExecutor};
use jobgate_infra_system::SimulatedExecutor;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn reference_queue(jobs: usize) -> Arc<JobQueue> {
    let queue = Arc::new(JobQueue::from_config(&EngineConfig::default()));
    for i in 0..jobs {
        queue.try_push(Job::new(format!("job-{}", i))).unwrap();
    }
    queue
}

/// 3 workers, capacity 100, 10 buffered jobs of 2s each, 5s timeout:
/// ceil(10 / 3) * 2 = 8 > 5, so the forced path must trigger
#[tokio::test(start_paused = true)]
async fn test_reference_scenario_is_forced() {
    let config = EngineConfig::default();
    let queue = reference_queue(10);
    let executor = Arc::new(SimulatedExecutor::new(config.job_duration));
    let pool = WorkerPool::spawn(config.workers, Arc::clone(&queue), executor);
    let coordinator = ShutdownCoordinator::new(Arc::clone(&queue), config.drain_timeout);

    let start = Instant::now();
    let outcome = coordinator.shutdown(pool).await;

    assert!(!outcome.is_clean());
    match outcome {
        ShutdownOutcome::Forced {
            abandoned_jobs,
            workers_aborted,
        } => {
            assert_eq!(abandoned_jobs, 1);
            assert_eq!(workers_aborted, 3);
        }
        other => panic!("expected forced shutdown, got {:?}", other),
    }
    // Forced exactly at the drain timeout, not later
    assert!(start.elapsed() < Duration::from_secs(6));
    assert_eq!(coordinator.phase(), ShutdownPhase::Terminated);
}

/// Same load with a timeout that covers ceil(10 / 3) * 2 = 8s drains cleanly
#[tokio::test(start_paused = true)]
async fn test_reference_scenario_clean_with_enough_time() {
    let config = EngineConfig {
        drain_timeout: Duration::from_secs(8),
        ..Default::default()
    };
    let queue = reference_queue(10);
    let executor = Arc::new(SimulatedExecutor::new(config.job_duration));
    let pool = WorkerPool::spawn(config.workers, Arc::clone(&queue), executor);
    let coordinator = ShutdownCoordinator::new(Arc::clone(&queue), config.drain_timeout);

    let outcome = coordinator.shutdown(pool).await;

    match outcome {
        ShutdownOutcome::Clean { reports } => {
            let per_worker: Vec<u64> = reports.iter().map(|r| r.processed).collect();
            assert_eq!(per_worker.iter().sum::<u64>(), 10);
            assert!(per_worker.iter().all(|&n| n >= 3));
        }
        other => panic!("expected clean shutdown, got {:?}", other),
    }
    assert_eq!(queue.state(), QueueState::Closed);
}

/// Fewer jobs than workers finish in one round
#[tokio::test(start_paused = true)]
async fn test_light_load_drains_in_one_round() {
    let config = EngineConfig::default();
    let queue = reference_queue(3);
    let executor = Arc::new(SimulatedExecutor::new(config.job_duration));
    let pool = WorkerPool::spawn(config.workers, Arc::clone(&queue), executor);
    let coordinator = ShutdownCoordinator::new(Arc::clone(&queue), config.drain_timeout);

    let start = Instant::now();
    assert!(coordinator.shutdown(pool).await.is_clean());
    assert!(start.elapsed() < Duration::from_secs(3));
}

/// An idle pool shuts down immediately
#[tokio::test(start_paused = true)]
async fn test_idle_pool_shuts_down_immediately() {
    let queue = reference_queue(0);
    let executor = Arc::new(SimulatedExecutor::new(Duration::from_secs(2)));
    let pool = WorkerPool::spawn(3, Arc::clone(&queue), executor);
    let coordinator = ShutdownCoordinator::new(Arc::clone(&queue), Duration::from_secs(5));

    let start = Instant::now();
    let outcome = coordinator.shutdown(pool).await;

    assert!(outcome.is_clean());
    assert!(start.elapsed() < Duration::from_secs(1));
}

/// Failing and panicking jobs neither kill workers nor block the drain
#[tokio::test(start_paused = true)]
async fn test_failing_jobs_do_not_block_drain() {
    let queue = reference_queue(0);
    for p in ["ok-1", "poison", "ok-2", "ok-3"] {
        queue.try_push(Job::new(p)).unwrap();
    }
    let executor = Arc::new(MockJobExecutor::new(MockBehavior::PanicOn(
        "poison".to_string(),
    )));
    let pool = WorkerPool::spawn(1, Arc::clone(&queue), executor.clone());
    let coordinator = ShutdownCoordinator::new(Arc::clone(&queue), Duration::from_secs(5));

    let outcome = coordinator.shutdown(pool).await;

    match outcome {
        ShutdownOutcome::Clean { reports } => {
            assert_eq!(reports.len(), 1);
            assert_eq!(reports[0].processed, 3);
            assert_eq!(reports[0].panicked, 1);
        }
        other => panic!("expected clean shutdown, got {:?}", other),
    }
    assert_eq!(executor.executed_payloads(), vec!["ok-1", "poison", "ok-2", "ok-3"]);
}
