// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pokemon Domain Events
//!
//! - `EggHatched` carries a complete Pokemon and re-establishes its identity
//! - `PokemonCaught` carries one catch attempt, including the drawn outcome

use serde::{Deserialize, Serialize};

use super::DomainEvent;
use crate::domain::{CatchAttempt, Pokemon, Validate, ValidationResult};

/// Pokemon Domain Events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "data")]
pub enum PokemonEvent {
    /// A Pokemon hatched; replaces any prior state
    EggHatched(Pokemon),

    /// A pokeball was thrown; appended to the catch history
    PokemonCaught(CatchAttempt),
}

impl DomainEvent for PokemonEvent {
    const NAMES: &'static [&'static str] = &["EggHatched", "PokemonCaught"];

    fn event_name(&self) -> &'static str {
        match self {
            PokemonEvent::EggHatched(_) => "EggHatched",
            PokemonEvent::PokemonCaught(_) => "PokemonCaught",
        }
    }
}

impl Validate for PokemonEvent {
    const SHAPE: &'static str = "PokemonEvent";

    fn validate(&self) -> ValidationResult {
        match self {
            PokemonEvent::EggHatched(pokemon) => pokemon.validate(),
            PokemonEvent::PokemonCaught(attempt) => attempt.validate(),
        }
    }
}
