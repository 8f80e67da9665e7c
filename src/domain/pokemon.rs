// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pokemon Records
//!
//! Closed, typed records for the Pokemon shape and its catch history.
//! Wire names are camelCase; the elemental type is serialized as `type`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::invariants::{validate_name, validate_pokedex_number, Validate, ValidationResult};

/// Elemental type of a Pokemon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PokemonType {
    Fire,
    Water,
    Grass,
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PokemonType::Fire => write!(f, "Fire"),
            PokemonType::Water => write!(f, "Water"),
            PokemonType::Grass => write!(f, "Grass"),
        }
    }
}

/// One recorded throw of a pokeball
///
/// `success` is the outcome drawn when the throw was decided. Records are
/// only ever appended to a Pokemon's history, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatchAttempt {
    /// Caller-chosen attempt identifier (not required to be unique)
    pub id: u32,

    /// Whether the Pokemon was caught by this throw
    #[serde(default)]
    pub success: bool,
}

impl Validate for CatchAttempt {
    const SHAPE: &'static str = "CatchAttempt";

    fn validate(&self) -> ValidationResult {
        Ok(())
    }
}

/// The Pokemon shape
///
/// Used as the aggregate state, as the `HatchEgg` command payload and as the
/// `EggHatched` event payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Pokemon {
    /// National pokedex number
    pub pokedex_number: u32,

    /// Display name
    pub name: String,

    /// Elemental type
    #[serde(rename = "type")]
    pub pokemon_type: PokemonType,

    /// Every throw ever decided against this Pokemon, in version order
    #[serde(default)]
    pub catch_attempts: Vec<CatchAttempt>,
}

impl Pokemon {
    /// Create a freshly hatched Pokemon with no catch history
    pub fn new(pokedex_number: u32, name: impl Into<String>, pokemon_type: PokemonType) -> Self {
        Self {
            pokedex_number,
            name: name.into(),
            pokemon_type,
            catch_attempts: Vec::new(),
        }
    }

    /// Whether any recorded throw succeeded
    pub fn is_caught(&self) -> bool {
        self.catch_attempts.iter().any(|a| a.success)
    }
}

impl Validate for Pokemon {
    const SHAPE: &'static str = "Pokemon";

    fn validate(&self) -> ValidationResult {
        validate_pokedex_number(Self::SHAPE, self.pokedex_number)?;
        validate_name(Self::SHAPE, &self.name)?;
        self.catch_attempts.iter().try_for_each(Validate::validate)
    }
}
