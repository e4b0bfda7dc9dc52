//! Core error types for SpendSync.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Pending queue operation failed: {0}")]
    Queue(#[from] QueueError),

    #[error("Input validation failed: {0}")]
    Validation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors raised by the durable pending queue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// The persisted blob could not be decoded. The blob is left in place.
    #[error("Persisted queue is corrupt: {0}")]
    CorruptState(String),

    /// The queue could not be read from or written to storage.
    #[error("Failed to persist queue: {0}")]
    PersistenceFailure(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns the queue error carried by this error, if any.
    pub fn as_queue_error(&self) -> Option<&QueueError> {
        match self {
            Error::Queue(e) => Some(e),
            _ => None,
        }
    }

    /// Collapses any error into a queue error.
    ///
    /// Queue errors pass through unchanged; everything else means the queue
    /// could not be persisted.
    pub fn into_queue_error(self) -> QueueError {
        match self {
            Error::Queue(e) => e,
            other => QueueError::PersistenceFailure(other.to_string()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_queue_error_passes_queue_errors_through() {
        let err = Error::Queue(QueueError::CorruptState("bad".to_string()));
        assert_eq!(
            err.into_queue_error(),
            QueueError::CorruptState("bad".to_string())
        );
    }

    #[test]
    fn test_into_queue_error_wraps_database_errors() {
        let err = Error::Database(DatabaseError::ConnectionFailed("locked".to_string()));
        match err.into_queue_error() {
            QueueError::PersistenceFailure(msg) => assert!(msg.contains("locked")),
            other => panic!("Expected PersistenceFailure, got {:?}", other),
        }
    }
}
