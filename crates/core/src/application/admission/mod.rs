// Admission Service - accepts job descriptors into the queue

pub mod enqueue;

pub use enqueue::{validate_request, Admission, AdmissionRequest};

use crate::application::job_queue::JobQueue;
use crate::error::{AppError, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Admission Service
///
/// Replies as soon as the job is buffered; execution happens later on the
/// worker pool and is never reported back.
pub struct AdmissionService {
    queue: Arc<JobQueue>,
}

impl AdmissionService {
    pub fn new(queue: Arc<JobQueue>) -> Self {
        Self { queue }
    }

    /// Admit a new job
    pub async fn submit(&self, req: AdmissionRequest) -> Result<Admission> {
        match enqueue::execute(&self.queue, req).await {
            Ok(admission) => {
                info!(job = %admission.job, queue_depth = admission.queue_depth, "Job admitted");
                Ok(admission)
            }
            Err(e) => {
                match &e {
                    AppError::Queue(q) => {
                        warn!(error = %q, retryable = q.is_retryable(), "Job rejected")
                    }
                    other => warn!(error = %other, "Invalid job submission"),
                }
                Err(e)
            }
        }
    }
}
