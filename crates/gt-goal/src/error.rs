// error.rs — Error types for the goal subsystem.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during goal operations.
#[derive(Debug, Error)]
pub enum GoalError {
    /// Input rejected at creation time. Nothing was written.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The requested goal was not found.
    #[error("goal not found: {0}")]
    NotFound(Uuid),

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize goal data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A stored line could not be decoded.
    #[error("corrupt record at {path}:{line}: {source}")]
    CorruptRecord {
        path: String,
        line: usize,
        source: serde_json::Error,
    },

    /// A thread panicked while holding the store lock.
    #[error("goal store lock poisoned")]
    LockPoisoned,
}

impl GoalError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        GoalError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// True when the underlying persistence failed, as opposed to a
    /// problem with the caller's input.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            GoalError::IoError { .. }
                | GoalError::SerializationError(_)
                | GoalError::CorruptRecord { .. }
                | GoalError::LockPoisoned
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_field() {
        let err = GoalError::validation("title", "must not be empty");
        assert_eq!(err.to_string(), "invalid title: must not be empty");
        assert!(!err.is_storage());
    }

    #[test]
    fn storage_classification() {
        assert!(GoalError::LockPoisoned.is_storage());
        let io = GoalError::IoError {
            path: "/tmp/x".to_string(),
            source: std::io::Error::other("disk gone"),
        };
        assert!(io.is_storage());
        assert!(!GoalError::NotFound(Uuid::new_v4()).is_storage());
    }
}
