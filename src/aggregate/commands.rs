// Copyright (c) 2025 - Cowboy AI, Inc.
//! Commands and Queries for the Pokemon Aggregate
//!
//! Commands express intent and can be rejected. They are never persisted.
//!
//! # Command Pattern
//!
//! ```text
//! payload → decode + validate → Command → decide(State, Command) → [Event]
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::invariants::validate_pokedex_number;
use crate::domain::{Pokemon, StreamId, Validate, ValidationResult};

/// Command to throw a pokeball at a Pokemon
///
/// `success` is accepted for compatibility with older clients and ignored:
/// the outcome is always drawn by the decider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThrowPokeballCommand {
    /// Target Pokemon
    pub pokedex_number: u32,

    /// Attempt identifier recorded in the catch history
    pub id: u32,

    /// Client-supplied outcome (ignored)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl Validate for ThrowPokeballCommand {
    const SHAPE: &'static str = "ThrowPokeball";

    fn validate(&self) -> ValidationResult {
        validate_pokedex_number(Self::SHAPE, self.pokedex_number)
    }
}

/// Hatch payload: the complete Pokemon that hatches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HatchEggCommand(pub Pokemon);

impl Validate for HatchEggCommand {
    const SHAPE: &'static str = "HatchEgg";

    fn validate(&self) -> ValidationResult {
        self.0.validate()
    }
}

/// Every command the Pokemon aggregate accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PokemonCommand {
    HatchEgg(HatchEggCommand),
    ThrowPokeball(ThrowPokeballCommand),
}

impl PokemonCommand {
    /// Registered command name
    pub fn name(&self) -> &'static str {
        match self {
            PokemonCommand::HatchEgg(_) => HatchEggCommand::SHAPE,
            PokemonCommand::ThrowPokeball(_) => ThrowPokeballCommand::SHAPE,
        }
    }

    /// Pokedex number the command is aimed at
    pub fn pokedex_number(&self) -> u32 {
        match self {
            PokemonCommand::HatchEgg(HatchEggCommand(pokemon)) => pokemon.pokedex_number,
            PokemonCommand::ThrowPokeball(cmd) => cmd.pokedex_number,
        }
    }

    /// Stream the command belongs to
    pub fn stream_id(&self) -> StreamId {
        StreamId::for_pokemon(self.pokedex_number())
    }
}

impl From<HatchEggCommand> for PokemonCommand {
    fn from(cmd: HatchEggCommand) -> Self {
        PokemonCommand::HatchEgg(cmd)
    }
}

impl From<ThrowPokeballCommand> for PokemonCommand {
    fn from(cmd: ThrowPokeballCommand) -> Self {
        PokemonCommand::ThrowPokeball(cmd)
    }
}

/// Read-side query for one Pokemon's current state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LookupPokemonQuery {
    pub pokedex_number: u32,
}

impl LookupPokemonQuery {
    /// Stream holding the Pokemon
    pub fn stream_id(&self) -> StreamId {
        StreamId::for_pokemon(self.pokedex_number)
    }
}

impl Validate for LookupPokemonQuery {
    const SHAPE: &'static str = "LookupPokemon";

    fn validate(&self) -> ValidationResult {
        validate_pokedex_number(Self::SHAPE, self.pokedex_number)
    }
}
