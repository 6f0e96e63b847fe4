// Central error type for the storage layer

use crate::domain::Frame;
use std::time::Duration;
use thiserror::Error;

/// Storage-level error type
///
/// An empty queue is not an error: `dequeue` reports it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Queue storage not started")]
    NotStarted,

    #[error("Queue storage already started")]
    AlreadyStarted,

    #[error("Invalid destination {destination:?}: {reason}")]
    InvalidDestination {
        destination: String,
        reason: String,
    },

    /// The rejected frame is handed back so the caller can retry it
    #[error("Queue full: {destination} (capacity {capacity})")]
    QueueFull {
        destination: String,
        capacity: usize,
        frame: Box<Frame>,
    },

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Operation cancelled")]
    Cancelled,
}

impl StorageError {
    pub fn invalid_destination(destination: &str, reason: impl Into<String>) -> Self {
        StorageError::InvalidDestination {
            destination: destination.to_string(),
            reason: reason.into(),
        }
    }

    /// Take back the frame of a rejected enqueue/requeue, if any
    pub fn into_frame(self) -> Option<Frame> {
        match self {
            StorageError::QueueFull { frame, .. } => Some(*frame),
            _ => None,
        }
    }

    /// Whether the broker may retry the same operation later.
    ///
    /// Lifecycle and validation errors are programming errors and never
    /// succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StorageError::StorageFailure(_)
                | StorageError::Io(_)
                | StorageError::Timeout(_)
                | StorageError::QueueFull { .. }
        )
    }
}

/// Result type alias using StorageError
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(StorageError::StorageFailure("disk".into()).is_transient());
        assert!(StorageError::Timeout(Duration::from_millis(5)).is_transient());
        assert!(StorageError::QueueFull {
            destination: "orders".into(),
            capacity: 1,
            frame: Box::new(Frame::message("a")),
        }
        .is_transient());

        assert!(!StorageError::NotStarted.is_transient());
        assert!(!StorageError::AlreadyStarted.is_transient());
        assert!(!StorageError::Cancelled.is_transient());
        assert!(!StorageError::invalid_destination("", "empty").is_transient());
    }

    #[test]
    fn test_display_names_destination() {
        let err = StorageError::QueueFull {
            destination: "/queue/orders".into(),
            capacity: 10,
            frame: Box::new(Frame::message("a")),
        };
        assert_eq!(err.to_string(), "Queue full: /queue/orders (capacity 10)");
    }

    #[test]
    fn test_into_frame_returns_rejected_frame() {
        let err = StorageError::QueueFull {
            destination: "orders".into(),
            capacity: 1,
            frame: Box::new(Frame::message("keep me")),
        };
        let frame = err.into_frame().unwrap();
        assert_eq!(frame.body(), b"keep me");

        assert!(StorageError::NotStarted.into_frame().is_none());
    }
}
