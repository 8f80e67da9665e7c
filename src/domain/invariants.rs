// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Schema Invariants
//!
//! Every payload that crosses the aggregate boundary is checked twice:
//!
//! 1. **Shape**: the untyped JSON must decode into a closed, typed record
//!    (unknown fields are rejected, only declared optional fields default).
//! 2. **Field rules**: the decoded record must satisfy [`Validate`].
//!
//! Both stages report a [`ValidationError`] naming the shape and, where
//! possible, the failing field.
//!
//! # Design Principles
//!
//! - **Pure Functions**: No I/O, no mutations, deterministic
//! - **Explicit Errors**: Return detailed validation failures
//! - **Composable**: Small functions that combine

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Payload could not be decoded into the named shape
    #[error("Malformed {shape} payload: {message}")]
    Malformed {
        shape: &'static str,
        /// Path to the failing field (`type`, `catchAttempts[0].id`), when known
        field: Option<String>,
        message: String,
    },

    /// Payload decoded but a field violates its rule
    #[error("Invalid {shape}.{field}: {reason}")]
    InvalidField {
        shape: &'static str,
        field: &'static str,
        reason: String,
    },

    /// No command with this name is registered
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// No query with this name is registered
    #[error("Unknown query: {0}")]
    UnknownQuery(String),

    /// Command targets a different stream than the one it was sent to
    #[error("Command targets {target} but was sent to {stream_id}")]
    WrongStream { stream_id: String, target: String },
}

impl ValidationError {
    /// Build a `Malformed` error from a path-tracking serde failure
    pub fn malformed(
        shape: &'static str,
        err: serde_path_to_error::Error<serde_json::Error>,
    ) -> Self {
        let path = err.path();
        let path = path.iter().next().is_some().then(|| path.to_string());
        let message = err.into_inner().to_string();

        ValidationError::Malformed {
            shape,
            field: field_path(path, &message),
            message,
        }
    }

    /// Name of the shape that failed, if the error concerns a payload
    pub fn shape(&self) -> Option<&'static str> {
        match self {
            ValidationError::Malformed { shape, .. }
            | ValidationError::InvalidField { shape, .. } => Some(*shape),
            _ => None,
        }
    }

    /// Path of the failing field, when it can be determined
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::InvalidField { field, .. } => Some(*field),
            ValidationError::Malformed { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

/// Combine the deserializer's position with the key serde names in
/// struct-level errors
///
/// Missing, unknown and duplicate fields are reported by the enclosing
/// struct, so the position stops one level short; serde quotes the key in
/// backticks (``missing field `name` ``).
fn field_path(path: Option<String>, message: &str) -> Option<String> {
    let key = ["missing field", "unknown field", "duplicate field"]
        .iter()
        .any(|prefix| message.starts_with(*prefix))
        .then(|| {
            let start = message.find('`')? + 1;
            let len = message[start..].find('`')?;
            Some(&message[start..start + len])
        })
        .flatten();

    match (path, key) {
        (Some(path), Some(key)) if path == key || path.ends_with(&format!(".{key}")) => Some(path),
        (Some(path), Some(key)) => Some(format!("{path}.{key}")),
        (path, key) => path.or_else(|| key.map(str::to_string)),
    }
}

/// A typed record with field-level invariants
pub trait Validate {
    /// Schema name used in error reports
    const SHAPE: &'static str;

    /// Check field invariants
    fn validate(&self) -> ValidationResult;
}

/// Decode an untyped payload into a closed record and validate it
pub fn decode<T>(payload: serde_json::Value) -> Result<T, ValidationError>
where
    T: Validate + serde::de::DeserializeOwned,
{
    let value: T = serde_path_to_error::deserialize(payload)
        .map_err(|e| ValidationError::malformed(T::SHAPE, e))?;
    value.validate()?;
    Ok(value)
}

/// Maximum length of a Pokemon name
pub const MAX_NAME_LENGTH: usize = 64;

/// Validate a pokedex number
///
/// # Rules
/// - Must be at least 1 (the national dex starts at #1)
pub fn validate_pokedex_number(shape: &'static str, pokedex_number: u32) -> ValidationResult {
    if pokedex_number == 0 {
        return Err(ValidationError::InvalidField {
            shape,
            field: "pokedexNumber",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Validate a Pokemon name
///
/// # Rules
/// - Must not be empty
/// - Must not carry leading or trailing whitespace (names are not trimmed)
/// - At most [`MAX_NAME_LENGTH`] characters
pub fn validate_name(shape: &'static str, name: &str) -> ValidationResult {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if name.trim() != name {
        "must not have leading or trailing whitespace"
    } else if name.chars().count() > MAX_NAME_LENGTH {
        "exceeds 64 characters"
    } else {
        return Ok(());
    };

    Err(ValidationError::InvalidField {
        shape,
        field: "name",
        reason: reason.to_string(),
    })
}
