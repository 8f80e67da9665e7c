// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event Store Abstraction
//!
//! This module defines the event storage interface the aggregate runtime
//! depends on, plus an in-memory implementation.
//!
//! # Architecture
//!
//! ```text
//! Command → Aggregate → Events → EventStore → Persistent Storage
//!                                    ↑
//!                         Snapshots (optional cache)
//! ```
//!
//! # Event Store Requirements
//!
//! 1. **Append-Only**: Events are never updated or deleted
//! 2. **Ordered**: Versions within a stream are gapless, starting at 1
//! 3. **Conditional**: An append states the version it expects and fails
//!    with [`StoreError::ConcurrencyConflict`] if the stream moved on
//! 4. **Replay**: Events can be read back in order from any version
//!
//! # Example
//!
//! ```rust
//! use pokemon_aggregate::domain::StreamId;
//! use pokemon_aggregate::event_store::{EventStore, InMemoryEventStore};
//! use pokemon_aggregate::events::StoredEvent;
//!
//! # tokio_test::block_on(async {
//! let store = InMemoryEventStore::new();
//! let stream_id = StreamId::for_pokemon(1);
//!
//! let event = StoredEvent::new(stream_id.clone(), 1, "PokemonCaught", serde_json::json!({"id": 1, "success": false}));
//! let version = store.append(&stream_id, 0, vec![event]).await.unwrap();
//! assert_eq!(version, 1);
//!
//! // Stale writers are rejected
//! let stale = StoredEvent::new(stream_id.clone(), 1, "PokemonCaught", serde_json::json!({"id": 2, "success": false}));
//! assert!(store.append(&stream_id, 0, vec![stale]).await.is_err());
//! # });
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::StreamId;
use crate::errors::StoreResult;
use crate::events::{Snapshot, StoredEvent};

pub mod memory;

pub use memory::InMemoryEventStore;

/// Event Store trait for persisting and retrieving domain events
///
/// Implementations should ensure:
///
/// - **Atomicity**: Appending events succeeds or fails as a unit
/// - **Consistency**: The expected-version check and the write are one step
/// - **Replay**: Events can be read back in order
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Latest snapshot for a stream, if any
    async fn load_snapshot(&self, stream_id: &StreamId) -> StoreResult<Option<Snapshot<Value>>>;

    /// Read events for a stream from a specific version (inclusive)
    async fn read_events_from(
        &self,
        stream_id: &StreamId,
        from_version: u64,
    ) -> StoreResult<Vec<StoredEvent<Value>>>;

    /// Read all events for a stream
    async fn read_events(&self, stream_id: &StreamId) -> StoreResult<Vec<StoredEvent<Value>>> {
        self.read_events_from(stream_id, 1).await
    }

    /// Append events to a stream
    ///
    /// `expected_version` is the version observed when the events were
    /// decided (0 for a stream with no events). The events must carry
    /// versions `expected_version + 1, expected_version + 2, ...`.
    ///
    /// # Returns
    ///
    /// The stream version after appending
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if the stream is no longer at `expected_version`
    /// - `Corrupt` if the events do not continue the stream contiguously
    /// - `Unavailable` if writing to storage fails
    async fn append(
        &self,
        stream_id: &StreamId,
        expected_version: u64,
        events: Vec<StoredEvent<Value>>,
    ) -> StoreResult<u64>;

    /// Store a snapshot, replacing an older one for the same stream
    async fn save_snapshot(&self, snapshot: Snapshot<Value>) -> StoreResult<()>;

    /// Current version of a stream (0 if it has no events)
    async fn current_version(&self, stream_id: &StreamId) -> StoreResult<u64>;
}
