// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for event store operations

use thiserror::Error;

/// Errors raised by an [`EventStore`](crate::event_store::EventStore)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The stream moved past the version the writer observed
    #[error("Concurrency conflict on {stream_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        stream_id: String,
        expected: u64,
        actual: u64,
    },

    /// The backing storage could not be reached
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Stored data cannot be interpreted (version gap, unknown event name, ...)
    #[error("Corrupt stream {stream_id}: {reason}")]
    Corrupt { stream_id: String, reason: String },
}

/// Result type for event store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Whether repeating the operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StoreError::ConcurrencyConflict { .. } | StoreError::Unavailable(_)
        )
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
