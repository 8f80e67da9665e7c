// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Reducer
//!
//! These tests prove properties of `apply_event` that must hold for every
//! event sequence, not just the hand-picked ones in the unit tests.

use pokemon_aggregate::aggregate::{apply_event, catch_status, from_events};
use pokemon_aggregate::domain::{CatchAttempt, Pokemon, PokemonType, StreamId, Validate};
use pokemon_aggregate::events::PokemonEvent;
use pokemon_aggregate::state_machine::{CatchStatus, StateMachine};
use proptest::prelude::*;

// ============================================================================
// Property Test Strategies
// ============================================================================

fn pokemon_type() -> impl Strategy<Value = PokemonType> {
    prop_oneof![
        Just(PokemonType::Fire),
        Just(PokemonType::Water),
        Just(PokemonType::Grass),
    ]
}

fn catch_attempt() -> impl Strategy<Value = CatchAttempt> {
    (0u32..1000, any::<bool>()).prop_map(|(id, success)| CatchAttempt { id, success })
}

fn pokemon() -> impl Strategy<Value = Pokemon> {
    (1u32..1026, "[A-Z][a-z]{2,10}", pokemon_type())
        .prop_map(|(n, name, t)| Pokemon::new(n, name, t))
}

/// Generate arbitrary Pokemon events
fn pokemon_event() -> impl Strategy<Value = PokemonEvent> {
    prop_oneof![
        1 => pokemon().prop_map(PokemonEvent::EggHatched),
        4 => catch_attempt().prop_map(PokemonEvent::PokemonCaught),
    ]
}

/// Generate a vector of Pokemon events
fn event_sequence() -> impl Strategy<Value = Vec<PokemonEvent>> {
    prop::collection::vec(pokemon_event(), 0..40)
}

fn stream() -> StreamId {
    StreamId::for_pokemon(1)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Reduction is deterministic
    #[test]
    fn prop_reduce_is_deterministic(events in event_sequence()) {
        let state1 = from_events(&stream(), &events);
        let state2 = from_events(&stream(), &events);

        prop_assert_eq!(state1, state2, "Same events must produce same state");
    }

    /// Property: Folding in two steps equals folding the concatenation
    #[test]
    fn prop_fold_splits_anywhere(events in event_sequence(), split in any::<prop::sample::Index>()) {
        let at = if events.is_empty() { 0 } else { split.index(events.len() + 1) };
        let (head, tail) = events.split_at(at);

        let stepwise = tail.iter().fold(from_events(&stream(), head), apply_event);
        let whole = from_events(&stream(), &events);

        prop_assert_eq!(stepwise, whole);
    }

    /// Property: A caught event appends exactly one record, nothing else changes
    #[test]
    fn prop_caught_appends_one_record(state in pokemon(), attempt in catch_attempt()) {
        let next = apply_event(state.clone(), &PokemonEvent::PokemonCaught(attempt.clone()));

        prop_assert_eq!(next.catch_attempts.len(), state.catch_attempts.len() + 1);
        prop_assert_eq!(next.catch_attempts.last(), Some(&attempt));
        prop_assert_eq!(&next.catch_attempts[..state.catch_attempts.len()], &state.catch_attempts[..]);
        prop_assert_eq!(next.pokedex_number, state.pokedex_number);
        prop_assert_eq!(next.name, state.name);
        prop_assert_eq!(next.pokemon_type, state.pokemon_type);
    }

    /// Property: A hatch replaces the state with its payload
    #[test]
    fn prop_hatch_replaces(events in event_sequence(), hatched in pokemon()) {
        let state = from_events(&stream(), &events);

        let next = apply_event(state, &PokemonEvent::EggHatched(hatched.clone()));

        prop_assert_eq!(next, hatched);
    }

    /// Property: Reducer output satisfies the state schema
    #[test]
    fn prop_reduced_state_is_valid(first in pokemon(), events in event_sequence()) {
        let mut all = vec![PokemonEvent::EggHatched(first)];
        all.extend(events);

        let state = from_events(&stream(), &all);

        prop_assert!(state.validate().is_ok());
    }

    /// Property: Derived catch status agrees with the history
    #[test]
    fn prop_status_matches_history(events in event_sequence()) {
        let state = from_events(&stream(), &events);
        let status = catch_status(&state);

        prop_assert_eq!(status.is_terminal(), state.is_caught());
        prop_assert_eq!(status == CatchStatus::Wild, state.catch_attempts.is_empty());
    }
}
