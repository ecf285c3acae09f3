// Job Executor Port
// Abstraction for running one popped job to completion

use crate::domain::Job;
use async_trait::async_trait;
use thiserror::Error;

/// Execution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Job failed: {0}")]
    Failed(String),
}

/// Job Executor trait
///
/// Implementations:
/// - SimulatedExecutor (infra-system): fixed-duration unit of work
/// - MockJobExecutor: scripted behaviour for tests
///
/// An executor may panic; the worker pool contains the panic and keeps the
/// worker alive.
#[async_trait]
pub trait JobExecutor: Send + Sync {
    /// Run a job to completion
    ///
    /// # Errors
    /// - ExecutionError::Failed if the work itself failed
    async fn execute(&self, job: &Job) -> Result<(), ExecutionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Mock executor behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Always succeed
        Success,
        /// Always fail with message
        Fail(String),
        /// Panic with message (for panic isolation testing)
        Panic(String),
        /// Fail only for the given payload
        FailOn(String),
        /// Panic only for the given payload
        PanicOn(String),
        /// Succeed after sleeping (honours a paused tokio clock)
        Delay(Duration),
    }

    /// Mock Job Executor for testing
    #[derive(Clone)]
    pub struct MockJobExecutor {
        behavior: MockBehavior,
        executed: Arc<Mutex<Vec<Job>>>,
    }

    impl MockJobExecutor {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                executed: Arc::new(Mutex::new(Vec::new())),
            }
        }
        pub fn new_success() -> Self {
            Self::new(MockBehavior::Success)
        }
        pub fn new_panic_inducing(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Panic(message.into()))
        }
        pub fn new_delay(duration: Duration) -> Self {
            Self::new(MockBehavior::Delay(duration))
        }
        pub fn call_count(&self) -> usize {
            self.executed.lock().unwrap().len()
        }
        /// Jobs in the order execution started
        pub fn executed(&self) -> Vec<Job> {
            self.executed.lock().unwrap().clone()
        }
        /// Payloads in the order execution started
        pub fn executed_payloads(&self) -> Vec<String> {
            self.executed()
                .into_iter()
                .map(Job::into_payload)
                .collect()
        }
    }

    #[async_trait]
    impl JobExecutor for MockJobExecutor {
        async fn execute(&self, job: &Job) -> Result<(), ExecutionError> {
            self.executed.lock().unwrap().push(job.clone());

            match self.behavior.clone() {
                MockBehavior::Success => Ok(()),
                MockBehavior::Fail(msg) => Err(ExecutionError::Failed(msg)),
                MockBehavior::Panic(msg) => {
                    panic!("{}", msg); // Actually panic for panic isolation testing
                }
                MockBehavior::FailOn(payload) if job.payload() == payload => {
                    Err(ExecutionError::Failed(format!("scripted failure for {}", payload)))
                }
                MockBehavior::PanicOn(payload) if job.payload() == payload => {
                    panic!("scripted panic for {}", payload);
                }
                MockBehavior::FailOn(_) | MockBehavior::PanicOn(_) => Ok(()),
                MockBehavior::Delay(duration) => {
                    tokio::time::sleep(duration).await;
                    Ok(())
                }
            }
        }
    }
}
