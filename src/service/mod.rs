// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer
//!
//! The application service that orchestrates domain logic and event storage.
//!
//! # Architecture
//!
//! ```text
//! (streamId, commandName, payload)
//!     ↓
//! Schema Registry → typed Command
//!     ↓
//! Load (snapshot + suffix events) → State
//!     ↓
//! Decider → Events → validate
//!     ↓
//! Event Store append (expected version)
//!     ↓
//! Reducer → New State → Snapshot Policy
//! ```
//!
//! # Transaction Semantics
//!
//! The conditional append is the commit point. Every failure before it
//! leaves the stream untouched; a failure after it (the snapshot write) is
//! reported but does not fail the command.
//!
//! # Error Categories
//!
//! [`ServiceError::category`] separates "your input was wrong" from "try
//! again" from "the system is broken".

use serde::{Deserialize, Serialize};

use crate::domain::ValidationError;
use crate::errors::StoreError;

pub mod runtime;
pub mod snapshot;

pub use runtime::{AggregateRuntime, CommandOutcome, LoadedState, Outcome, PokemonRuntime};
pub use snapshot::{SnapshotPolicy, SnapshotStatus};

/// Service layer result type
pub type ServiceResult<T, E> = Result<T, ServiceError<E>>;

/// Service layer errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError<E> {
    /// Payload failed schema validation; nothing was loaded or stored
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Decider rejected the command; nothing was stored
    #[error("Command rejected: {0}")]
    Domain(E),

    /// Another writer advanced the stream first
    #[error("Concurrency conflict on {stream_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        stream_id: String,
        expected: u64,
        actual: u64,
    },

    /// Event store failure
    #[error("Storage error: {0}")]
    Storage(#[source] StoreError),
}

/// Coarse classification for callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed input; fix it before resending
    InvalidInput,

    /// Business rule said no; resending the same input will not help
    Rejected,

    /// Lost a race; reload and try again
    Conflict,

    /// Storage could not be reached; try again later
    Unavailable,

    /// Stored data is unusable
    Internal,
}

impl<E> ServiceError<E> {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::Validation(_) => ErrorCategory::InvalidInput,
            ServiceError::Domain(_) => ErrorCategory::Rejected,
            ServiceError::ConcurrencyConflict { .. } => ErrorCategory::Conflict,
            ServiceError::Storage(StoreError::Unavailable(_)) => ErrorCategory::Unavailable,
            ServiceError::Storage(_) => ErrorCategory::Internal,
        }
    }

    /// Whether re-running load → decide → append may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Conflict | ErrorCategory::Unavailable
        )
    }
}

impl<E> From<StoreError> for ServiceError<E> {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConcurrencyConflict {
                stream_id,
                expected,
                actual,
            } => ServiceError::ConcurrencyConflict {
                stream_id,
                expected,
                actual,
            },
            other => ServiceError::Storage(other),
        }
    }
}
