// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event-sourced Pokemon aggregate
//!
//! A Pokemon's state is never stored directly: it is derived by replaying
//! the ordered events of its stream (`pokemon-<pokedexNumber>`).
//!
//! - [`domain`] - Records, stream ids and schema validation
//! - [`events`] - Domain events and storage envelopes
//! - [`aggregate`] - Reducer, decider and the injected random source
//! - [`state_machine`] - Catch lifecycle
//! - [`schema`] - Name → validator registry
//! - [`event_store`] - Store interface with optimistic concurrency
//! - [`service`] - Aggregate runtime and snapshot policy
//! - [`config`] - Environment configuration
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pokemon_aggregate::aggregate::{FixedDraw, PokemonAggregate};
//! use pokemon_aggregate::domain::StreamId;
//! use pokemon_aggregate::event_store::InMemoryEventStore;
//! use pokemon_aggregate::service::{AggregateRuntime, SnapshotPolicy};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let runtime = AggregateRuntime::new(
//!     PokemonAggregate::default(),
//!     Arc::new(InMemoryEventStore::new()),
//!     Arc::new(FixedDraw(0.9)),
//!     SnapshotPolicy::Never,
//! )
//! .unwrap();
//!
//! let stream_id = StreamId::for_pokemon(1);
//! runtime
//!     .handle(&stream_id, "HatchEgg", json!({ "pokedexNumber": 1, "name": "Bulbasaur", "type": "Grass" }))
//!     .await
//!     .unwrap();
//!
//! let outcome = runtime
//!     .handle(&stream_id, "ThrowPokeball", json!({ "pokedexNumber": 1, "id": 1 }))
//!     .await
//!     .unwrap();
//!
//! assert!(outcome.state.catch_attempts[0].success);
//! assert_eq!(outcome.version, 2);
//! # });
//! ```

pub mod aggregate;
pub mod config;
pub mod domain;
pub mod errors;
pub mod event_store;
pub mod events;
pub mod schema;
pub mod service;
pub mod state_machine;

// Re-export commonly used types
pub use aggregate::{Aggregate, DomainError, PokemonAggregate, PokemonCommand};
pub use config::{ConfigError, RuntimeConfig};
pub use domain::{CatchAttempt, Pokemon, PokemonType, StreamId, ValidationError};
pub use errors::{StoreError, StoreResult};
pub use event_store::{EventStore, InMemoryEventStore};
pub use events::{PokemonEvent, Snapshot, StoredEvent};
pub use service::{AggregateRuntime, ErrorCategory, PokemonRuntime, ServiceError, SnapshotPolicy};
