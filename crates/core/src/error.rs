// Central Error Type for the Application

use thiserror::Error;

/// Typed outcome of a rejected push
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// No space freed up within the allowed wait; retry later
    #[error("Queue is full (capacity {capacity})")]
    Full { capacity: usize },

    /// The queue has been closed for shutdown; not retryable
    #[error("Queue is closed")]
    Closed,
}

impl QueueError {
    /// Whether the caller may reasonably try the same push again later
    pub fn is_retryable(&self) -> bool {
        matches!(self, QueueError::Full { .. })
    }
}

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_full_is_retryable() {
        assert!(QueueError::Full { capacity: 1 }.is_retryable());
        assert!(!QueueError::Closed.is_retryable());
    }

    #[test]
    fn test_queue_error_passes_through_app_error() {
        let err: AppError = QueueError::Full { capacity: 100 }.into();
        assert_eq!(err.to_string(), "Queue is full (capacity 100)");
    }
}
