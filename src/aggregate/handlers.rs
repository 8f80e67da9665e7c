// Copyright (c) 2025 - Cowboy AI, Inc.
//! Command Handlers for the Pokemon Aggregate
//!
//! Handlers take the current state and a command and return the event to
//! append, or a [`DomainError`].
//!
//! # Handler Pattern
//!
//! ```text
//! handle_command(State, Command) → Result<Event, DomainError>
//! ```
//!
//! Handlers perform no I/O. The one permitted non-deterministic input, the
//! catch draw, arrives through an explicit [`RandomSource`] and its outcome
//! is written into the returned event.

use crate::aggregate::commands::{HatchEggCommand, ThrowPokeballCommand};
use crate::aggregate::pokemon::catch_status;
use crate::aggregate::random::{CatchPolicy, RandomSource};
use crate::domain::{CatchAttempt, Pokemon};
use crate::events::PokemonEvent;
use crate::state_machine::StateMachine;

/// Business rule rejection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The Pokemon already has a successful catch in its history
    #[error("Pokemon #{pokedex_number} is already caught")]
    AlreadyCaught { pokedex_number: u32 },
}

/// Handle HatchEgg command
///
/// # Business Rules
/// - Accepted unconditionally; the hatched Pokemon replaces prior state
pub fn handle_hatch_egg(_state: &Pokemon, command: HatchEggCommand) -> PokemonEvent {
    PokemonEvent::EggHatched(command.0)
}

/// Handle ThrowPokeball command
///
/// # Business Rules
/// - Rejected once any recorded throw succeeded
/// - Otherwise draws exactly once; success iff the draw beats the policy threshold
pub fn handle_throw_pokeball(
    state: &Pokemon,
    command: ThrowPokeballCommand,
    policy: &CatchPolicy,
    random: &dyn RandomSource,
) -> Result<PokemonEvent, DomainError> {
    let status = catch_status(state);
    if status.is_terminal() {
        return Err(DomainError::AlreadyCaught {
            pokedex_number: state.pokedex_number,
        });
    }

    let success = policy.roll(random);

    Ok(PokemonEvent::PokemonCaught(CatchAttempt {
        id: command.id,
        success,
    }))
}
