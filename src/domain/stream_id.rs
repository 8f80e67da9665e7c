// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stream Identifier Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stream identifier validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamIdError {
    #[error("Stream id is empty")]
    Empty,

    #[error("Stream id exceeds maximum length of 128 characters: {0}")]
    TooLong(usize),

    #[error("Invalid character in stream id: {0:?}")]
    InvalidCharacter(char),
}

/// Key naming one aggregate instance's event history
///
/// Invariants:
/// - Non-empty, at most 128 characters
/// - ASCII alphanumerics, `-`, `_` and `.` only
///
/// Stream ids derived from a domain key are deterministic and injective:
/// the same pokedex number always maps to the same id, different numbers
/// never collide.
///
/// # Examples
///
/// ```rust
/// use pokemon_aggregate::domain::StreamId;
///
/// let id = StreamId::for_pokemon(25);
/// assert_eq!(id.as_str(), "pokemon-25");
/// assert_eq!(id.pokedex_number(), Some(25));
///
/// assert!(StreamId::new("").is_err());
/// assert!(StreamId::new("pokemon 25").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StreamId(String);

impl StreamId {
    /// Prefix shared by every Pokemon stream
    pub const POKEMON_PREFIX: &'static str = "pokemon-";

    /// Maximum length of a stream id
    pub const MAX_LENGTH: usize = 128;

    /// Create a new stream id with validation
    pub fn new(id: impl Into<String>) -> Result<Self, StreamIdError> {
        let id = id.into();

        if id.is_empty() {
            return Err(StreamIdError::Empty);
        }

        if id.len() > Self::MAX_LENGTH {
            return Err(StreamIdError::TooLong(id.len()));
        }

        if let Some(ch) = id
            .chars()
            .find(|ch| !ch.is_ascii_alphanumeric() && !matches!(ch, '-' | '_' | '.'))
        {
            return Err(StreamIdError::InvalidCharacter(ch));
        }

        Ok(Self(id))
    }

    /// Derive the stream id for a pokedex number
    pub fn for_pokemon(pokedex_number: u32) -> Self {
        Self(format!("{}{}", Self::POKEMON_PREFIX, pokedex_number))
    }

    /// Pokedex number encoded in a `pokemon-<n>` stream id
    pub fn pokedex_number(&self) -> Option<u32> {
        self.0
            .strip_prefix(Self::POKEMON_PREFIX)
            .and_then(|n| n.parse().ok())
    }

    /// Get the stream id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StreamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StreamId {
    type Error = StreamIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for StreamId {
    type Error = StreamIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StreamId> for String {
    fn from(id: StreamId) -> Self {
        id.0
    }
}
