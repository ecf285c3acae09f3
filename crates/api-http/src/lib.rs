//! HTTP Admission Layer
//!
//! Accepts job descriptors over HTTP and pushes them into the job queue.
//! Replies as soon as the job is buffered; execution is never reported back.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use handler::AdmissionHandler;
pub use server::{router, HttpServer, HttpServerConfig, HttpServerHandle};
