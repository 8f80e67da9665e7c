// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Functional Aggregates
//!
//! This module provides the functional aggregate pattern for event sourcing:
//! - Deciding is a function: (State, Command) → Result<[Event], Error>
//! - State reconstruction via event folding: [Event] → State
//! - No I/O, no side effects
//! - All state changes represented as events
//!
//! # Event Sourcing Pattern
//!
//! ```text
//! Command → Aggregate → Events → Event Store
//!    ↓          ↓          ↓
//! Intent   Decision     Facts
//! ```
//!
//! # Fold Pattern
//!
//! State is reconstructed by folding events:
//!
//! ```rust
//! use pokemon_aggregate::aggregate::{apply_event, initial_state};
//! use pokemon_aggregate::domain::{CatchAttempt, Pokemon, PokemonType, StreamId};
//! use pokemon_aggregate::events::PokemonEvent;
//!
//! let stream_id = StreamId::for_pokemon(1);
//! let events = vec![
//!     PokemonEvent::EggHatched(Pokemon::new(1, "Bulbasaur", PokemonType::Grass)),
//!     PokemonEvent::PokemonCaught(CatchAttempt { id: 1, success: false }),
//! ];
//!
//! let state = events.iter().fold(initial_state(&stream_id), apply_event);
//! assert_eq!(state.catch_attempts.len(), 1);
//! ```
//!
//! # Design Principles
//!
//! ## 1. Command-Event Separation
//! - Commands express intent (what should happen)
//! - Events express facts (what did happen)
//! - Commands can fail, events cannot
//!
//! ## 2. Pure Event Application
//! - `apply_event(State, Event) → State`
//! - No validation in event application (already happened)
//! - Deterministic reconstruction from events
//!
//! ## 3. Randomness as Parameter
//! - Never draw from an ambient generator in domain logic
//! - The draw source is passed explicitly to `decide`
//! - The outcome is stored in the event, so replay never draws

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use crate::domain::{StreamId, Validate};
use crate::events::DomainEvent;
use crate::schema::{RegistryError, SchemaRegistry};

pub mod commands;
pub mod handlers;
pub mod pokemon;
pub mod random;

pub use commands::*;
pub use handlers::*;
pub use pokemon::{apply_event, catch_status, from_events, initial_state, PokemonAggregate};
pub use random::{CatchPolicy, FixedDraw, ProcessRng, RandomSource};

/// Decider and reducer for one kind of stream
///
/// The runtime drives an implementation through load, decide, append and
/// fold; the implementation itself never touches storage.
pub trait Aggregate: Send + Sync + 'static {
    /// Aggregate name used in logs
    const NAME: &'static str;

    /// Materialized state
    type State: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Validate + Send + Sync;

    /// Closed set of commands
    type Command: Debug + Send;

    /// Closed set of events
    type Event: DomainEvent;

    /// Business rule rejection
    type Error: std::error::Error + Send + Sync + 'static;

    /// Register command decoders and event names
    fn register(registry: &mut SchemaRegistry<Self::Command>) -> Result<(), RegistryError>;

    /// State of a stream with no events
    fn initial_state(stream_id: &StreamId) -> Self::State;

    /// Name of a command as registered
    fn command_name(command: &Self::Command) -> &'static str;

    /// Stream a command is addressed to, when the command carries one
    fn target(_command: &Self::Command) -> Option<StreamId> {
        None
    }

    /// Reducer: pure and total over `Self::Event`
    fn apply(state: Self::State, event: &Self::Event) -> Self::State;

    /// Decider
    fn decide(
        &self,
        state: &Self::State,
        command: Self::Command,
        random: &dyn RandomSource,
    ) -> Result<Vec<Self::Event>, Self::Error>;

    /// Fold events into a state
    fn fold<'a, I>(state: Self::State, events: I) -> Self::State
    where
        I: IntoIterator<Item = &'a Self::Event>,
    {
        events.into_iter().fold(state, Self::apply)
    }
}
