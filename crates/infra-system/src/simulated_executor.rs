// Simulated executor: the reference fixed-duration unit of work
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

use jobgate_core::domain::Job;
use jobgate_core::port::{ExecutionError, JobExecutor};

/// Executes every job by holding the worker for a fixed duration
pub struct SimulatedExecutor {
    duration: Duration,
}

impl SimulatedExecutor {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[async_trait]
impl JobExecutor for SimulatedExecutor {
    async fn execute(&self, job: &Job) -> Result<(), ExecutionError> {
        info!(
            job = %job,
            duration_ms = self.duration.as_millis() as u64,
            "Simulating job execution"
        );
        sleep(self.duration).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_execution_takes_configured_duration() {
        let executor = SimulatedExecutor::new(Duration::from_secs(2));
        let start = Instant::now();

        executor.execute(&Job::new("report")).await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_zero_duration_completes() {
        let executor = SimulatedExecutor::new(Duration::ZERO);
        assert!(executor.execute(&Job::new("noop")).await.is_ok());
        assert_eq!(executor.duration(), Duration::ZERO);
    }
}
