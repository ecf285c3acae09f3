// Jobgate Core - Job Queue, Worker Pool & Shutdown Coordination
// NO transport or process dependencies (adapters live in their own crates)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, QueueError, Result};
