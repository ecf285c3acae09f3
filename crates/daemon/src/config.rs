//! Daemon configuration (CLI flags with environment fallbacks)
//!
//! ```text
//! JOBGATE_PORT=9000 JOBGATE_WORKERS=8 JOBGATE_QUEUE_CAPACITY=500 ./jobgate
//! ./jobgate --port 9000 --workers 8 --admission-wait-ms 250
//! ```

use clap::{Parser, ValueEnum};
use jobgate_api_http::HttpServerConfig;
use jobgate_core::domain::{EngineConfig, PushPolicy};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored (development)
    Pretty,
    /// One JSON object per line (production)
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "jobgate")]
#[command(about = "Bounded job queue with a fixed worker pool behind an HTTP admission endpoint")]
#[command(version)]
pub struct DaemonConfig {
    /// Address the admission endpoint binds to
    #[arg(long, env = "JOBGATE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port the admission endpoint listens on
    #[arg(short, long, env = "JOBGATE_PORT", default_value = "8080")]
    pub port: u16,

    /// Maximum number of buffered jobs
    #[arg(long, env = "JOBGATE_QUEUE_CAPACITY", default_value = "100")]
    pub queue_capacity: usize,

    /// Number of workers draining the queue
    #[arg(short, long, env = "JOBGATE_WORKERS", default_value = "3")]
    pub workers: usize,

    /// Duration of one simulated job, in milliseconds
    #[arg(long, env = "JOBGATE_JOB_DURATION_MS", default_value = "2000")]
    pub job_duration_ms: u64,

    /// How long shutdown waits for the queue to drain, in milliseconds
    #[arg(long, env = "JOBGATE_DRAIN_TIMEOUT_MS", default_value = "5000")]
    pub drain_timeout_ms: u64,

    /// How long a submission waits for space in a full queue (0 = reject immediately)
    #[arg(long, env = "JOBGATE_ADMISSION_WAIT_MS", default_value = "0")]
    pub admission_wait_ms: u64,

    /// Log output format
    #[arg(long, env = "JOBGATE_LOG_FORMAT", value_enum, default_value = "pretty")]
    pub log_format: LogFormat,
}

impl DaemonConfig {
    /// Engine settings, validated before anything is started
    pub fn engine_config(&self) -> jobgate_core::Result<EngineConfig> {
        let config = EngineConfig {
            queue_capacity: self.queue_capacity,
            workers: self.workers,
            job_duration: Duration::from_millis(self.job_duration_ms),
            drain_timeout: Duration::from_millis(self.drain_timeout_ms),
            push_policy: PushPolicy::from_wait(Duration::from_millis(self.admission_wait_ms)),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> DaemonConfig {
        let mut argv = vec!["jobgate"];
        argv.extend_from_slice(args);
        DaemonConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_map_to_engine_config() {
        let config = parse(&[
            "--queue-capacity",
            "10",
            "--workers",
            "2",
            "--job-duration-ms",
            "50",
            "--drain-timeout-ms",
            "700",
            "--admission-wait-ms",
            "25",
        ]);
        let engine = config.engine_config().unwrap();

        assert_eq!(engine.queue_capacity, 10);
        assert_eq!(engine.workers, 2);
        assert_eq!(engine.job_duration, Duration::from_millis(50));
        assert_eq!(engine.drain_timeout, Duration::from_millis(700));
        assert_eq!(engine.push_policy, PushPolicy::Wait(Duration::from_millis(25)));
    }

    #[test]
    fn test_zero_workers_fails_fast() {
        let config = parse(&["--workers", "0"]);
        let err = config.engine_config().unwrap_err();
        assert!(err.to_string().contains("worker count"));
    }

    #[test]
    fn test_negative_capacity_rejected_by_parser() {
        let result = DaemonConfig::try_parse_from(["jobgate", "--queue-capacity", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_http_config() {
        let config = parse(&["--host", "0.0.0.0", "--port", "9000", "--log-format", "json"]);
        let http = config.http_config();
        assert_eq!(http.host, "0.0.0.0");
        assert_eq!(http.port, 9000);
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
