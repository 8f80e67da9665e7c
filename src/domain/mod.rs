// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pokemon Domain Models
//!
//! Value objects and closed records shared by commands, events and state.
//!
//! # Value Objects with Invariants
//!
//! - [`StreamId`] - Deterministic, collision-free stream key (`pokemon-<n>`)
//!
//! # Records
//!
//! - [`Pokemon`] - The Pokemon shape (state, hatch payload, hatch event)
//! - [`CatchAttempt`] - One entry of the append-only catch history
//! - [`PokemonType`] - Fire, Water or Grass
//!
//! # Validation
//!
//! [`invariants`] holds the schema checks every payload passes before it
//! reaches the decider or the event store.

pub mod invariants;
pub mod pokemon;
pub mod stream_id;

pub use invariants::{decode, Validate, ValidationError, ValidationResult};
pub use pokemon::{CatchAttempt, Pokemon, PokemonType};
pub use stream_id::{StreamId, StreamIdError};
