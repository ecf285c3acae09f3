// Enqueue Use Case

use crate::application::job_queue::JobQueue;
use crate::domain::constants::MAX_JOB_PAYLOAD_BYTES;
use crate::domain::Job;
use crate::error::{AppError, Result};

/// Job descriptor as extracted from an inbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionRequest {
    pub job: String,
}

impl AdmissionRequest {
    pub fn new(job: impl Into<String>) -> Self {
        Self { job: job.into() }
    }
}

/// Acknowledgment that a job entered the buffer
///
/// Says nothing about whether the job has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub job: Job,
    /// Queue length observed right after the push
    pub queue_depth: usize,
}

/// Reject descriptors the queue should never buffer
pub fn validate_request(req: &AdmissionRequest) -> Result<()> {
    if req.job.is_empty() {
        return Err(AppError::Validation("job descriptor is empty".to_string()));
    }
    if req.job.len() > MAX_JOB_PAYLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "job descriptor too long ({} bytes, max {})",
            req.job.len(),
            MAX_JOB_PAYLOAD_BYTES
        )));
    }
    Ok(())
}

/// Execute enqueue use case
///
/// # Errors
/// - AppError::Validation for an empty or oversized descriptor
/// - AppError::Queue(Full) when no space freed within the queue's push policy
/// - AppError::Queue(Closed) once shutdown has closed the queue
pub async fn execute(queue: &JobQueue, req: AdmissionRequest) -> Result<Admission> {
    validate_request(&req)?;

    let job = Job::new(req.job);
    queue.push(job.clone()).await?;

    Ok(Admission {
        job,
        queue_depth: queue.len(),
    })
}
