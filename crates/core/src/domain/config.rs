// Engine Configuration

use super::error::{DomainError, Result};
use super::queue::PushPolicy;
use super::constants::{
    DEFAULT_DRAIN_TIMEOUT, DEFAULT_JOB_DURATION, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT,
};
use std::time::Duration;

/// Sizing and timing of the queue, the pool and the shutdown sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub queue_capacity: usize,
    pub workers: usize,
    /// Duration of one simulated unit of work
    pub job_duration: Duration,
    /// How long shutdown waits for the pool to drain
    pub drain_timeout: Duration,
    pub push_policy: PushPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            workers: DEFAULT_WORKER_COUNT,
            job_duration: DEFAULT_JOB_DURATION,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
            push_policy: PushPolicy::Reject,
        }
    }
}

impl EngineConfig {
    /// Reject values the engine cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(DomainError::InvalidConfig(
                "queue capacity must be at least 1".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(DomainError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_values() {
        let config = EngineConfig::default();
        assert_eq!(config.queue_capacity, 100);
        assert_eq!(config.workers, 3);
        assert_eq!(config.job_duration, Duration::from_secs(2));
        assert_eq!(config.drain_timeout, Duration::from_secs(5));
        assert_eq!(config.push_policy, PushPolicy::Reject);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = EngineConfig {
            queue_capacity: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = EngineConfig {
            workers: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("worker count"));
    }
}
