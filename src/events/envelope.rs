// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stored Event and Snapshot Envelopes
//!
//! The store persists payloads as JSON (`StoredEvent<Value>`,
//! `Snapshot<Value>`); the runtime works with typed envelopes and converts at
//! the boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::DomainEvent;
use crate::domain::StreamId;

/// Event envelope for storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent<E> {
    /// Unique event ID (UUID v7 for time-ordering)
    pub event_id: Uuid,

    /// Stream this event belongs to
    pub stream_id: StreamId,

    /// Position within the stream, starting at 1
    pub version: u64,

    /// When the event was appended
    pub timestamp: DateTime<Utc>,

    /// Event name (for deserialization)
    pub event_type: String,

    /// The event payload
    pub data: E,
}

impl<E> StoredEvent<E> {
    /// Create a new stored event envelope
    pub fn new(stream_id: StreamId, version: u64, event_type: impl Into<String>, data: E) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            stream_id,
            version,
            timestamp: Utc::now(),
            event_type: event_type.into(),
            data,
        }
    }
}

impl<E: DomainEvent> StoredEvent<E> {
    /// Wrap a domain event at the given stream position
    pub fn from_event(stream_id: StreamId, version: u64, event: E) -> Self {
        Self::new(stream_id, version, event.event_name(), event)
    }

    /// Convert into the untyped form the store persists
    pub fn to_raw(&self) -> Result<StoredEvent<Value>, serde_json::Error> {
        let (event_type, data) = self.data.encode()?;
        Ok(StoredEvent {
            event_id: self.event_id,
            stream_id: self.stream_id.clone(),
            version: self.version,
            timestamp: self.timestamp,
            event_type,
            data,
        })
    }
}

impl StoredEvent<Value> {
    /// Interpret the payload as a domain event
    pub fn decode<E: DomainEvent>(self) -> Result<StoredEvent<E>, serde_json::Error> {
        let data = E::decode(&self.event_type, self.data)?;
        Ok(StoredEvent {
            event_id: self.event_id,
            stream_id: self.stream_id,
            version: self.version,
            timestamp: self.timestamp,
            event_type: self.event_type,
            data,
        })
    }
}

/// Materialized state of a stream at a given version
///
/// Always reproducible by replaying the stream's first `version` events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<S> {
    /// Stream the state belongs to
    pub stream_id: StreamId,

    /// Version of the last event folded into `state`
    pub version: u64,

    /// Folded state
    pub state: S,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,
}

impl<S> Snapshot<S> {
    /// Create a snapshot taken now
    pub fn new(stream_id: StreamId, version: u64, state: S) -> Self {
        Self {
            stream_id,
            version,
            state,
            taken_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CatchAttempt;
    use crate::events::PokemonEvent;
    use serde_json::json;

    #[test]
    fn test_stored_event_creation() {
        let stream_id = StreamId::for_pokemon(1);
        let event = StoredEvent::new(stream_id.clone(), 1, "EggHatched", "test data");

        assert_eq!(event.stream_id, stream_id);
        assert_eq!(event.version, 1);
        assert_eq!(event.event_type, "EggHatched");
        assert_eq!(event.data, "test data");
    }

    #[test]
    fn test_raw_conversion_keeps_envelope() {
        let typed = StoredEvent::from_event(
            StreamId::for_pokemon(7),
            2,
            PokemonEvent::PokemonCaught(CatchAttempt { id: 9, success: false }),
        );

        let raw = typed.to_raw().unwrap();
        assert_eq!(raw.event_type, "PokemonCaught");
        assert_eq!(raw.data, json!({ "id": 9, "success": false }));

        let back = raw.decode::<PokemonEvent>().unwrap();
        assert_eq!(back, typed);
    }

    #[test]
    fn test_snapshot_creation() {
        let snapshot = Snapshot::new(StreamId::for_pokemon(1), 3, json!({ "name": "Bulbasaur" }));

        assert_eq!(snapshot.version, 3);
        assert_eq!(snapshot.state["name"], "Bulbasaur");
    }
}
