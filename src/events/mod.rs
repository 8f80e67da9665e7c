// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain Events
//!
//! Events are immutable facts representing state changes that have occurred.
//!
//! # Event Sourcing Principles
//!
//! 1. **Events are immutable**: Once appended, events never change
//! 2. **Events are past tense**: Named for what happened (Hatched, not Hatch)
//! 3. **Events carry their decisions**: A random outcome drawn while deciding
//!    is stored verbatim in the event and never recomputed on replay
//! 4. **Events are ordered**: `version` is strictly increasing and gapless
//!    within a stream, starting at 1
//!
//! # Event Flow
//!
//! ```text
//! Command → Decider → Event → EventStore
//!                       ↓
//!                    Reducer → State
//! ```
//!
//! # Wire Format
//!
//! Every event kind serializes as an adjacently tagged pair:
//!
//! ```json
//! { "name": "PokemonCaught", "data": { "id": 1, "success": true } }
//! ```
//!
//! The store keeps `name` in [`StoredEvent::event_type`] and `data` as the
//! payload, so [`DomainEvent::encode`] and [`DomainEvent::decode`] only split
//! and rejoin that pair.
//!
//! # Module Organization
//!
//! - [`envelope`] - Stored event and snapshot envelopes
//! - [`pokemon`] - Pokemon aggregate events

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

use crate::domain::Validate;

pub mod envelope;
pub mod pokemon;

pub use envelope::{Snapshot, StoredEvent};
pub use pokemon::PokemonEvent;

/// A closed set of event kinds belonging to one aggregate
///
/// Implementors serialize with `#[serde(tag = "name", content = "data")]`.
pub trait DomainEvent:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Validate + Send + Sync + 'static
{
    /// Every event name this type can carry
    const NAMES: &'static [&'static str];

    /// Name of this event's kind
    fn event_name(&self) -> &'static str;

    /// Split the event into its name and payload
    fn encode(&self) -> Result<(String, Value), serde_json::Error> {
        let mut tagged = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            other => {
                return Err(serde::ser::Error::custom(format!(
                    "event did not serialize as a tagged object: {other}"
                )))
            }
        };
        let data = tagged.remove("data").unwrap_or(Value::Null);
        Ok((self.event_name().to_string(), data))
    }

    /// Rebuild an event from a stored name and payload
    fn decode(name: &str, data: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::json!({ "name": name, "data": data }))
    }
}
