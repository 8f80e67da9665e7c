// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for pokemon-aggregate
//!
//! Deterministic Pokemon, payloads, draw sources and store wrappers shared by
//! the integration tests.
//!
//! # Design Principles
//! - No test draws from OS entropy; every draw is scripted or fixed
//! - Store failures and races are injected by wrappers, never by timing

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use pokemon_aggregate::aggregate::{FixedDraw, PokemonAggregate, RandomSource};
use pokemon_aggregate::domain::{Pokemon, PokemonType, StreamId};
use pokemon_aggregate::event_store::{EventStore, InMemoryEventStore};
use pokemon_aggregate::events::{Snapshot, StoredEvent};
use pokemon_aggregate::service::{AggregateRuntime, PokemonRuntime, SnapshotPolicy};
use pokemon_aggregate::{StoreError, StoreResult};

/// Draw above the default threshold
pub const HIGH_DRAW: f64 = 0.9;

/// Draw below the default threshold
pub const LOW_DRAW: f64 = 0.1;

pub fn bulbasaur() -> Pokemon {
    Pokemon::new(1, "Bulbasaur", PokemonType::Grass)
}

pub fn charmander() -> Pokemon {
    Pokemon::new(4, "Charmander", PokemonType::Fire)
}

pub fn squirtle() -> Pokemon {
    Pokemon::new(7, "Squirtle", PokemonType::Water)
}

/// `HatchEgg` payload for a Pokemon
pub fn hatch_payload(pokemon: &Pokemon) -> Value {
    serde_json::to_value(pokemon).expect("Pokemon serializes")
}

/// `ThrowPokeball` payload
pub fn throw_payload(pokedex_number: u32, id: u32) -> Value {
    json!({ "pokedexNumber": pokedex_number, "id": id })
}

/// Runtime over any store with a given draw source
pub fn runtime_with(
    store: Arc<dyn EventStore>,
    random: Arc<dyn RandomSource>,
    snapshot_policy: SnapshotPolicy,
) -> PokemonRuntime {
    AggregateRuntime::new(PokemonAggregate::default(), store, random, snapshot_policy)
        .expect("Pokemon aggregate registers cleanly")
}

/// Runtime over an in-memory store that always draws `draw`
pub fn runtime(store: Arc<InMemoryEventStore>, draw: f64) -> PokemonRuntime {
    runtime_with(store, Arc::new(FixedDraw(draw)), SnapshotPolicy::Never)
}

/// Draws from a script, then repeats `fallback`
pub struct ScriptedDraws {
    draws: Mutex<VecDeque<f64>>,
    fallback: f64,
}

impl ScriptedDraws {
    pub fn new(draws: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            draws: Mutex::new(draws.into_iter().collect()),
            fallback,
        }
    }
}

impl RandomSource for ScriptedDraws {
    fn draw(&self) -> f64 {
        self.draws
            .lock()
            .expect("draw script lock")
            .pop_front()
            .unwrap_or(self.fallback)
    }
}

/// Store that lets a rival writer win the race before the next `races` appends
pub struct RacingStore {
    pub inner: InMemoryEventStore,
    races: AtomicU32,
}

impl RacingStore {
    pub fn new(races: u32) -> Self {
        Self {
            inner: InMemoryEventStore::new(),
            races: AtomicU32::new(races),
        }
    }

    /// Let a rival win the next `races` appends
    pub fn arm(&self, races: u32) {
        self.races.store(races, Ordering::SeqCst);
    }

    /// Event appended by the rival writer
    pub fn rival_event(stream_id: &StreamId, version: u64) -> StoredEvent<Value> {
        StoredEvent::new(
            stream_id.clone(),
            version,
            "PokemonCaught",
            json!({ "id": 99, "success": false }),
        )
    }
}

#[async_trait]
impl EventStore for RacingStore {
    async fn load_snapshot(&self, stream_id: &StreamId) -> StoreResult<Option<Snapshot<Value>>> {
        self.inner.load_snapshot(stream_id).await
    }

    async fn read_events_from(
        &self,
        stream_id: &StreamId,
        from_version: u64,
    ) -> StoreResult<Vec<StoredEvent<Value>>> {
        self.inner.read_events_from(stream_id, from_version).await
    }

    async fn append(
        &self,
        stream_id: &StreamId,
        expected_version: u64,
        events: Vec<StoredEvent<Value>>,
    ) -> StoreResult<u64> {
        let race = self
            .races
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        if race {
            self.inner
                .append(
                    stream_id,
                    expected_version,
                    vec![Self::rival_event(stream_id, expected_version + 1)],
                )
                .await?;
        }

        self.inner.append(stream_id, expected_version, events).await
    }

    async fn save_snapshot(&self, snapshot: Snapshot<Value>) -> StoreResult<()> {
        self.inner.save_snapshot(snapshot).await
    }

    async fn current_version(&self, stream_id: &StreamId) -> StoreResult<u64> {
        self.inner.current_version(stream_id).await
    }
}

/// Store whose operations can be switched to fail
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryEventStore,
    pub fail_reads: AtomicBool,
    pub fail_appends: AtomicBool,
    pub fail_snapshots: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(flag: &AtomicBool, operation: &str) -> StoreResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("{operation} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl EventStore for FlakyStore {
    async fn load_snapshot(&self, stream_id: &StreamId) -> StoreResult<Option<Snapshot<Value>>> {
        Self::check(&self.fail_reads, "snapshot read")?;
        self.inner.load_snapshot(stream_id).await
    }

    async fn read_events_from(
        &self,
        stream_id: &StreamId,
        from_version: u64,
    ) -> StoreResult<Vec<StoredEvent<Value>>> {
        Self::check(&self.fail_reads, "event read")?;
        self.inner.read_events_from(stream_id, from_version).await
    }

    async fn append(
        &self,
        stream_id: &StreamId,
        expected_version: u64,
        events: Vec<StoredEvent<Value>>,
    ) -> StoreResult<u64> {
        Self::check(&self.fail_appends, "append")?;
        self.inner.append(stream_id, expected_version, events).await
    }

    async fn save_snapshot(&self, snapshot: Snapshot<Value>) -> StoreResult<()> {
        Self::check(&self.fail_snapshots, "snapshot write")?;
        self.inner.save_snapshot(snapshot).await
    }

    async fn current_version(&self, stream_id: &StreamId) -> StoreResult<u64> {
        self.inner.current_version(stream_id).await
    }
}
