//! HTTP Request/Response Types

use serde::{Deserialize, Serialize};

/// GET|POST /enqueue?job=<descriptor>
#[derive(Debug, Default, Deserialize)]
pub struct EnqueueQuery {
    /// Optional so a missing parameter becomes our own 400, not an extractor rejection
    pub job: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnqueueResponse {
    pub status: String,
    pub job: String,
    pub queue_depth: usize,
}

impl EnqueueResponse {
    pub fn accepted(job: impl Into<String>, queue_depth: usize) -> Self {
        Self {
            status: "accepted".to_string(),
            job: job.into(),
            queue_depth,
        }
    }
}

/// Structured JSON error body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
