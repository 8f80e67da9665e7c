// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pokemon Aggregate
//!
//! ```text
//! Command → decide() → Result<[Event], DomainError>
//!                            ↓
//! Events → apply_event() → New State
//! ```
//!
//! The state is the [`Pokemon`] record itself. A stream with no events folds
//! to Missingno: the glitch Pokemon standing in for an unhatched egg.

use crate::aggregate::commands::{HatchEggCommand, PokemonCommand, ThrowPokeballCommand};
use crate::aggregate::handlers::{handle_hatch_egg, handle_throw_pokeball, DomainError};
use crate::aggregate::random::{CatchPolicy, RandomSource};
use crate::aggregate::Aggregate;
use crate::domain::{Pokemon, PokemonType, StreamId};
use crate::events::{DomainEvent, PokemonEvent};
use crate::schema::{RegistryError, SchemaRegistry};
use crate::state_machine::CatchStatus;

/// Name of the placeholder Pokemon in a stream that has not hatched yet
pub const MISSINGNO: &str = "Missingno";

/// State of a stream with no events
///
/// The pokedex number is taken from a `pokemon-<n>` stream id, or 0 for any
/// other stream.
pub fn initial_state(stream_id: &StreamId) -> Pokemon {
    Pokemon::new(
        stream_id.pokedex_number().unwrap_or(0),
        MISSINGNO,
        PokemonType::Fire,
    )
}

/// Apply event to state (pure function)
///
/// - `EggHatched` replaces the state entirely
/// - `PokemonCaught` appends one record to the catch history
///
/// Applying the same `PokemonCaught` twice appends twice.
pub fn apply_event(state: Pokemon, event: &PokemonEvent) -> Pokemon {
    match event {
        PokemonEvent::EggHatched(pokemon) => pokemon.clone(),
        PokemonEvent::PokemonCaught(attempt) => {
            let mut catch_attempts = state.catch_attempts;
            catch_attempts.push(attempt.clone());
            Pokemon {
                catch_attempts,
                ..state
            }
        }
    }
}

/// Reconstruct state from a stream's events
pub fn from_events(stream_id: &StreamId, events: &[PokemonEvent]) -> Pokemon {
    events
        .iter()
        .fold(initial_state(stream_id), apply_event)
}

/// Catch status derived from the recorded history
pub fn catch_status(state: &Pokemon) -> CatchStatus {
    CatchStatus::from_outcomes(state.catch_attempts.iter().map(|attempt| attempt.success))
}

/// Decider and reducer for Pokemon streams
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PokemonAggregate {
    catch_policy: CatchPolicy,
}

impl PokemonAggregate {
    pub fn new(catch_policy: CatchPolicy) -> Self {
        Self { catch_policy }
    }

    pub fn catch_policy(&self) -> &CatchPolicy {
        &self.catch_policy
    }
}

impl Aggregate for PokemonAggregate {
    const NAME: &'static str = "Pokemon";

    type State = Pokemon;
    type Command = PokemonCommand;
    type Event = PokemonEvent;
    type Error = DomainError;

    fn register(registry: &mut SchemaRegistry<PokemonCommand>) -> Result<(), RegistryError> {
        registry
            .register_command::<HatchEggCommand>()?
            .register_command::<ThrowPokeballCommand>()?
            .register_events(PokemonEvent::NAMES)?;
        Ok(())
    }

    fn initial_state(stream_id: &StreamId) -> Pokemon {
        initial_state(stream_id)
    }

    fn command_name(command: &PokemonCommand) -> &'static str {
        command.name()
    }

    fn target(command: &PokemonCommand) -> Option<StreamId> {
        Some(command.stream_id())
    }

    fn apply(state: Pokemon, event: &PokemonEvent) -> Pokemon {
        apply_event(state, event)
    }

    fn decide(
        &self,
        state: &Pokemon,
        command: PokemonCommand,
        random: &dyn RandomSource,
    ) -> Result<Vec<PokemonEvent>, DomainError> {
        let event = match command {
            PokemonCommand::HatchEgg(cmd) => handle_hatch_egg(state, cmd),
            PokemonCommand::ThrowPokeball(cmd) => {
                handle_throw_pokeball(state, cmd, &self.catch_policy, random)?
            }
        };
        Ok(vec![event])
    }
}
