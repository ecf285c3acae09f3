// Worker - Job execution loop and the supervised pool that runs it

mod panic_guard;

pub use panic_guard::panic_message;

use crate::application::job_queue::JobQueue;
use crate::domain::Job;
use crate::port::JobExecutor;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Tally a worker reports when it exits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerReport {
    pub worker_id: usize,
    /// Jobs that ran to completion successfully
    pub processed: u64,
    /// Jobs whose executor returned an error
    pub failed: u64,
    /// Jobs whose executor panicked
    pub panicked: u64,
}

impl WorkerReport {
    /// Every job this worker took off the queue
    pub fn total(&self) -> u64 {
        self.processed + self.failed + self.panicked
    }
}

/// Outcome of running a single job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed,
    Failed(String),
    Panicked(String),
}

/// Worker pulls jobs from the shared queue until it is closed and drained
pub struct Worker {
    id: usize,
    queue: Arc<JobQueue>,
    executor: Arc<dyn JobExecutor>,
}

impl Worker {
    pub fn new(id: usize, queue: Arc<JobQueue>, executor: Arc<dyn JobExecutor>) -> Self {
        Self {
            id,
            queue,
            executor,
        }
    }

    /// Run the worker loop until the queue reports closed-and-empty
    pub async fn run(self) -> WorkerReport {
        info!(worker_id = self.id, "Worker started");
        let mut report = WorkerReport {
            worker_id: self.id,
            ..Default::default()
        };

        while let Some(job) = self.queue.pop().await {
            match self.process_job(job).await {
                JobOutcome::Completed => report.processed += 1,
                JobOutcome::Failed(_) => report.failed += 1,
                JobOutcome::Panicked(_) => report.panicked += 1,
            }
        }

        info!(
            worker_id = self.id,
            processed = report.processed,
            failed = report.failed,
            panicked = report.panicked,
            "Worker stopped: queue closed and drained"
        );
        report
    }

    /// Execute one job with panic isolation
    ///
    /// The job runs in its own task so a panic surfaces as a `JoinError`
    /// instead of unwinding through the worker loop.
    pub async fn process_job(&self, job: Job) -> JobOutcome {
        info!(worker_id = self.id, job = %job, "Processing job");

        let executor = Arc::clone(&self.executor);
        let job = Arc::new(job);
        let job_for_exec = Arc::clone(&job);

        let handle = tokio::task::spawn(async move { executor.execute(&job_for_exec).await });

        match handle.await {
            Ok(Ok(())) => {
                info!(worker_id = self.id, job = %job, "Job completed");
                JobOutcome::Completed
            }
            Ok(Err(e)) => {
                warn!(worker_id = self.id, job = %job, error = %e, "Job failed");
                JobOutcome::Failed(e.to_string())
            }
            Err(join_err) if join_err.is_panic() => {
                let panic_msg = panic_message(join_err.into_panic());
                error!(worker_id = self.id, job = %job, panic_msg = %panic_msg, "Job panicked");
                JobOutcome::Panicked(panic_msg)
            }
            Err(join_err) => {
                error!(worker_id = self.id, job = %job, error = %join_err, "Job cancelled");
                JobOutcome::Failed(join_err.to_string())
            }
        }
    }
}

/// Fixed-size set of supervised workers sharing one queue
pub struct WorkerPool {
    workers: JoinSet<WorkerReport>,
    size: usize,
    // Reports of workers that already exited, kept across cancelled joins
    reports: Vec<WorkerReport>,
}

impl WorkerPool {
    /// Start `size` workers on the current tokio runtime
    pub fn spawn(size: usize, queue: Arc<JobQueue>, executor: Arc<dyn JobExecutor>) -> Self {
        let mut workers = JoinSet::new();
        for id in 0..size {
            let worker = Worker::new(id, Arc::clone(&queue), Arc::clone(&executor));
            workers.spawn(worker.run());
        }
        info!(workers = size, capacity = queue.capacity(), "Worker pool started");

        Self {
            workers,
            size,
            reports: Vec::with_capacity(size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Workers that have not exited yet
    pub fn running(&self) -> usize {
        self.workers.len()
    }

    /// Wait for every worker to exit
    ///
    /// Workers only exit once the queue is closed and drained, so call
    /// `JobQueue::close` first. Cancel-safe: reports collected before the
    /// future is dropped are returned by the next call.
    pub async fn join(&mut self) -> Vec<WorkerReport> {
        while let Some(result) = self.workers.join_next().await {
            match result {
                Ok(report) => self.reports.push(report),
                Err(e) => error!(error = %e, "Worker task ended abnormally"),
            }
        }
        let mut reports = std::mem::take(&mut self.reports);
        reports.sort_by_key(|r| r.worker_id);
        reports
    }

    /// Abort every worker still running; returns how many were aborted
    pub fn abort(&mut self) -> usize {
        let remaining = self.workers.len();
        self.workers.abort_all();
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PushPolicy;
    use crate::port::job_executor::mocks::{MockBehavior, MockJobExecutor};
    use std::time::Duration;

    fn queue_with(payloads: &[&str], capacity: usize) -> Arc<JobQueue> {
        let queue = Arc::new(JobQueue::new(capacity, PushPolicy::Reject));
        for p in payloads {
            queue.try_push(Job::new(*p)).unwrap();
        }
        queue
    }

    #[tokio::test]
    async fn test_single_worker_preserves_order() {
        let queue = queue_with(&["a", "b", "c"], 10);
        let executor = Arc::new(MockJobExecutor::new_success());

        let mut pool = WorkerPool::spawn(1, Arc::clone(&queue), executor.clone());
        queue.close();
        let reports = pool.join().await;

        assert_eq!(executor.executed_payloads(), vec!["a", "b", "c"]);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].processed, 3);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_worker() {
        let queue = queue_with(&["ok-1", "bad", "ok-2"], 10);
        let executor = Arc::new(MockJobExecutor::new(MockBehavior::FailOn("bad".into())));

        let mut pool = WorkerPool::spawn(1, Arc::clone(&queue), executor.clone());
        queue.close();
        let reports = pool.join().await;

        assert_eq!(executor.call_count(), 3);
        assert_eq!(reports[0].processed, 2);
        assert_eq!(reports[0].failed, 1);
    }

    #[tokio::test]
    async fn test_panic_does_not_stop_worker() {
        let queue = queue_with(&["before", "explode", "after"], 10);
        let executor = Arc::new(MockJobExecutor::new(MockBehavior::PanicOn(
            "explode".into(),
        )));

        let mut pool = WorkerPool::spawn(1, Arc::clone(&queue), executor.clone());
        queue.close();
        let reports = pool.join().await;

        assert_eq!(executor.executed_payloads(), vec!["before", "explode", "after"]);
        assert_eq!(reports[0].processed, 2);
        assert_eq!(reports[0].panicked, 1);
        assert_eq!(pool.running(), 0);
    }

    #[tokio::test]
    async fn test_process_job_reports_panic_message() {
        let queue = queue_with(&[], 1);
        let executor = Arc::new(MockJobExecutor::new_panic_inducing("kaboom"));
        let worker = Worker::new(7, queue, executor);

        let outcome = worker.process_job(Job::new("x")).await;
        assert_eq!(outcome, JobOutcome::Panicked("kaboom".to_string()));
    }

    #[tokio::test]
    async fn test_process_job_reports_failure_message() {
        let queue = queue_with(&[], 1);
        let executor = Arc::new(MockJobExecutor::new(MockBehavior::Fail("disk full".into())));
        let worker = Worker::new(3, queue, executor);

        let outcome = worker.process_job(Job::new("x")).await;
        assert_eq!(outcome, JobOutcome::Failed("Job failed: disk full".to_string()));
    }

    #[tokio::test]
    async fn test_each_job_delivered_once() {
        let payloads: Vec<String> = (0..50).map(|i| format!("job-{}", i)).collect();
        let refs: Vec<&str> = payloads.iter().map(String::as_str).collect();
        let queue = queue_with(&refs, 100);
        let executor = Arc::new(MockJobExecutor::new_success());

        let mut pool = WorkerPool::spawn(4, Arc::clone(&queue), executor.clone());
        queue.close();
        let reports = pool.join().await;

        let mut seen = executor.executed_payloads();
        seen.sort();
        let mut expected = payloads.clone();
        expected.sort();
        assert_eq!(seen, expected);
        assert_eq!(reports.iter().map(WorkerReport::total).sum::<u64>(), 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_workers_wait_for_jobs() {
        let queue = queue_with(&[], 10);
        let executor = Arc::new(MockJobExecutor::new_delay(Duration::from_millis(10)));
        let mut pool = WorkerPool::spawn(2, Arc::clone(&queue), executor.clone());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(pool.running(), 2, "idle workers must not exit while the queue is open");

        queue.try_push(Job::new("late")).unwrap();
        queue.close();
        pool.join().await;
        assert_eq!(executor.executed_payloads(), vec!["late"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_returns_running_count() {
        let queue = queue_with(&[], 10);
        let executor = Arc::new(MockJobExecutor::new_success());
        let mut pool = WorkerPool::spawn(3, Arc::clone(&queue), executor);

        assert_eq!(pool.size(), 3);
        assert_eq!(pool.abort(), 3);
        assert!(pool.join().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_keeps_reports_across_cancellation() {
        let queue = queue_with(&["only"], 10);
        let executor = Arc::new(MockJobExecutor::new_delay(Duration::from_secs(1)));
        let mut pool = WorkerPool::spawn(2, Arc::clone(&queue), executor);
        queue.close();

        // One worker exits at once, the other is busy until t=1s
        let early = tokio::time::timeout(Duration::from_millis(500), pool.join()).await;
        assert!(early.is_err());
        assert_eq!(pool.running(), 1);

        let reports = pool.join().await;
        assert_eq!(reports.len(), 2, "report collected before cancellation is kept");
        assert_eq!(reports.iter().map(WorkerReport::total).sum::<u64>(), 1);
    }
}
