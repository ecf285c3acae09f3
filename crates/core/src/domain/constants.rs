// Engine defaults and limits (no magic values)
use std::time::Duration;

/// Default bound on buffered jobs (100)
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Default number of workers draining the queue (3)
pub const DEFAULT_WORKER_COUNT: usize = 3;

/// Duration of one simulated unit of work (2s)
pub const DEFAULT_JOB_DURATION: Duration = Duration::from_secs(2);

/// How long shutdown waits for workers to drain the queue (5s)
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest accepted job descriptor, in bytes
pub const MAX_JOB_PAYLOAD_BYTES: usize = 4096;
