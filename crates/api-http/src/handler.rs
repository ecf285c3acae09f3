//! Admission Handlers
//!
//! Implements the business logic behind `/enqueue`.

use crate::error::ApiError;
use crate::types::{EnqueueQuery, EnqueueResponse};
use jobgate_core::application::{AdmissionRequest, AdmissionService, ShutdownToken};
use std::sync::Arc;
use tracing::debug;

/// Admission handler with injected dependencies
pub struct AdmissionHandler {
    service: AdmissionService,
    shutdown: ShutdownToken,
}

impl AdmissionHandler {
    pub fn new(service: AdmissionService, shutdown: ShutdownToken) -> Self {
        Self { service, shutdown }
    }

    /// GET|POST /enqueue
    pub async fn enqueue(&self, params: EnqueueQuery) -> Result<EnqueueResponse, ApiError> {
        // Requests still in flight after the stop signal are turned away before touching the queue
        if self.shutdown.is_shutdown() {
            debug!(phase = %self.shutdown.phase(), "Rejecting admission during shutdown");
            return Err(ApiError::ShuttingDown);
        }

        let job = params
            .job
            .ok_or_else(|| ApiError::BadRequest("missing query parameter: job".to_string()))?;

        let admission = self.service.submit(AdmissionRequest::new(job)).await?;

        Ok(EnqueueResponse::accepted(
            admission.job.into_payload(),
            admission.queue_depth,
        ))
    }
}

/// Shared state for the router
pub type SharedHandler = Arc<AdmissionHandler>;
