//! HTTP Error Types
//!
//! Maps application errors to HTTP status codes.

use crate::types::ErrorResponse;
use axum::extract::rejection::QueryRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use jobgate_core::error::{AppError, QueueError};
use thiserror::Error;

/// Seconds a client should wait before retrying a full queue
pub const RETRY_AFTER_SECS: u64 = 1;

/// API error types that map to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Queue is full (capacity {capacity})")]
    Busy { capacity: usize },

    #[error("Service is shutting down")]
    ShuttingDown,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(msg) => ApiError::BadRequest(msg),
            AppError::Domain(e) => ApiError::BadRequest(e.to_string()),
            AppError::Queue(QueueError::Full { capacity }) => ApiError::Busy { capacity },
            AppError::Queue(QueueError::Closed) => ApiError::ShuttingDown,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Busy { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::ShuttingDown => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::BadRequest(msg) => ErrorResponse::with_details("Bad request", msg.clone()),
            ApiError::Busy { capacity } => ErrorResponse::with_details(
                "Queue is full, try again later",
                format!("capacity: {}", capacity),
            ),
            ApiError::ShuttingDown => ErrorResponse::new("Service unavailable, shutting down"),
        };

        let mut response = (status, Json(body)).into_response();
        if matches!(self, ApiError::Busy { .. }) {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(RETRY_AFTER_SECS),
            );
        }
        response
    }
}
