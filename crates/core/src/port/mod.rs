// Port Layer - Interfaces for external dependencies

pub mod job_executor;

// Re-exports
pub use job_executor::{ExecutionError, JobExecutor};
