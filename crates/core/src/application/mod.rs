// Application Layer - Use Cases and Business Logic

pub mod admission;
pub mod job_queue;
pub mod shutdown;
pub mod worker;

// Re-exports
pub use admission::{Admission, AdmissionRequest, AdmissionService};
pub use job_queue::JobQueue;
pub use shutdown::{
    shutdown_channel, ShutdownCoordinator, ShutdownOutcome, ShutdownPhase, ShutdownSender,
    ShutdownToken,
};
pub use worker::{JobOutcome, Worker, WorkerPool, WorkerReport};
