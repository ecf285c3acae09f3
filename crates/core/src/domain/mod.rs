// Domain Layer - Pure types shared by the queue, the pool and the adapters

pub mod config;
pub mod constants;
pub mod error;
pub mod job;
pub mod queue;

// Re-exports
pub use config::EngineConfig;
pub use error::DomainError;
pub use job::Job;
pub use queue::{PushPolicy, QueueState, QueueStats};
