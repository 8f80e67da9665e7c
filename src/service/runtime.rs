// Copyright (c) 2025 - Cowboy AI, Inc.
//! Aggregate Runtime
//!
//! Drives one [`Aggregate`] against an [`EventStore`]:
//!
//! 1. Decode and validate the payload (no storage touched on failure)
//! 2. Load: latest snapshot plus events after it, folded through the reducer
//! 3. Decide; a rejection appends nothing
//! 4. Validate each produced event
//! 5. Append conditioned on the version observed in step 2
//! 6. Fold the appended events into the loaded state
//! 7. Apply the snapshot policy
//!
//! Concurrent commands for one stream may load and decide in parallel; the
//! conditional append linearizes them and the loser gets
//! [`ServiceError::ConcurrencyConflict`]. Commands for different streams
//! never contend.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::snapshot::{SnapshotPolicy, SnapshotStatus};
use super::{ServiceError, ServiceResult};
use crate::aggregate::random::{ProcessRng, RandomSource};
use crate::aggregate::{Aggregate, PokemonAggregate};
use crate::config::{ConfigError, RuntimeConfig};
use crate::domain::{StreamId, Validate, ValidationError};
use crate::errors::StoreError;
use crate::event_store::EventStore;
use crate::events::{DomainEvent, Snapshot, StoredEvent};
use crate::schema::{RegistryError, SchemaRegistry};

/// State of a stream as of its latest version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedState<S> {
    /// Folded state
    pub state: S,

    /// Version of the last event folded (0 for an empty stream)
    pub version: u64,

    /// Version of the snapshot the load started from, if any
    pub snapshot_version: Option<u64>,
}

/// Result of a successful command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOutcome<S, E> {
    /// State after folding the appended events
    pub state: S,

    /// Stream version after the append
    pub version: u64,

    /// Events appended by this command, in version order
    pub events: Vec<StoredEvent<E>>,

    /// What happened to the snapshot
    pub snapshot: SnapshotStatus,
}

/// Command outcome for an aggregate
pub type Outcome<A> = CommandOutcome<<A as Aggregate>::State, <A as Aggregate>::Event>;

/// Runtime for Pokemon streams
pub type PokemonRuntime = AggregateRuntime<PokemonAggregate>;

/// Load → decide → append → fold → snapshot
pub struct AggregateRuntime<A: Aggregate> {
    aggregate: A,
    store: Arc<dyn EventStore>,
    random: Arc<dyn RandomSource>,
    snapshot_policy: SnapshotPolicy,
    schemas: SchemaRegistry<A::Command>,
}

impl<A: Aggregate> AggregateRuntime<A> {
    /// Create a runtime, registering the aggregate's schemas
    ///
    /// Fails if the aggregate registers a name twice or leaves one of its
    /// event kinds unregistered.
    pub fn new(
        aggregate: A,
        store: Arc<dyn EventStore>,
        random: Arc<dyn RandomSource>,
        snapshot_policy: SnapshotPolicy,
    ) -> Result<Self, RegistryError> {
        let mut schemas = SchemaRegistry::new();
        A::register(&mut schemas)?;
        schemas.ensure_complete()?;
        schemas.ensure_events(A::Event::NAMES)?;

        Ok(Self {
            aggregate,
            store,
            random,
            snapshot_policy,
            schemas,
        })
    }

    pub fn aggregate(&self) -> &A {
        &self.aggregate
    }

    pub fn schemas(&self) -> &SchemaRegistry<A::Command> {
        &self.schemas
    }

    pub fn snapshot_policy(&self) -> SnapshotPolicy {
        self.snapshot_policy
    }

    /// Handle an untyped command addressed to a stream
    #[instrument(skip(self, payload), fields(aggregate = A::NAME, stream = %stream_id))]
    pub async fn handle(
        &self,
        stream_id: &StreamId,
        command_name: &str,
        payload: Value,
    ) -> ServiceResult<Outcome<A>, A::Error> {
        let command = self.schemas.decode_command(command_name, payload)?;
        self.execute(stream_id, command).await
    }

    /// Execute a typed command against a stream
    #[instrument(
        skip(self, command),
        fields(aggregate = A::NAME, stream = %stream_id, command = A::command_name(&command))
    )]
    pub async fn execute(
        &self,
        stream_id: &StreamId,
        command: A::Command,
    ) -> ServiceResult<Outcome<A>, A::Error> {
        if let Some(target) = A::target(&command) {
            if &target != stream_id {
                return Err(ValidationError::WrongStream {
                    stream_id: stream_id.to_string(),
                    target: target.to_string(),
                }
                .into());
            }
        }

        let loaded = self.load(stream_id).await?;

        let events = self
            .aggregate
            .decide(&loaded.state, command, self.random.as_ref())
            .map_err(ServiceError::Domain)?;

        for event in &events {
            event.validate()?;
        }

        if events.is_empty() {
            debug!(version = loaded.version, "Command produced no events");
            return Ok(CommandOutcome {
                state: loaded.state,
                version: loaded.version,
                events: Vec::new(),
                snapshot: SnapshotStatus::NotDue,
            });
        }

        let stored: Vec<StoredEvent<A::Event>> = events
            .into_iter()
            .zip(loaded.version + 1..)
            .map(|(event, version)| StoredEvent::from_event(stream_id.clone(), version, event))
            .collect();

        let raw = stored
            .iter()
            .map(|event| event.to_raw())
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)?;

        let version = match self.store.append(stream_id, loaded.version, raw).await {
            Ok(version) => version,
            Err(err) => {
                warn!(expected = loaded.version, error = %err, "Append failed");
                return Err(err.into());
            }
        };
        info!(version, events = stored.len(), "Appended events");

        let state = A::fold(loaded.state, stored.iter().map(|event| &event.data));
        let snapshot = self
            .snapshot_if_due(stream_id, version, loaded.snapshot_version, &state)
            .await;

        Ok(CommandOutcome {
            state,
            version,
            events: stored,
            snapshot,
        })
    }

    /// Execute a command, reloading and deciding afresh after each conflict
    ///
    /// Nothing from a conflicting attempt was stored, so every attempt draws
    /// its own outcome. Other errors are returned immediately.
    pub async fn execute_with_retry(
        &self,
        stream_id: &StreamId,
        command: A::Command,
        max_attempts: u32,
    ) -> ServiceResult<Outcome<A>, A::Error>
    where
        A::Command: Clone,
    {
        let max_attempts = max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.execute(stream_id, command.clone()).await {
                Err(ServiceError::ConcurrencyConflict { .. }) if attempt < max_attempts => {
                    warn!(stream = %stream_id, attempt, "Concurrency conflict, retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Current state of a stream
    ///
    /// Starts from the latest usable snapshot and replays the events after
    /// it. An unusable snapshot is skipped in favour of a full replay.
    #[instrument(skip(self), fields(aggregate = A::NAME, stream = %stream_id))]
    pub async fn load(&self, stream_id: &StreamId) -> ServiceResult<LoadedState<A::State>, A::Error> {
        let restored = match self.store.load_snapshot(stream_id).await? {
            Some(snapshot) => self.restore(stream_id, snapshot).await?,
            None => None,
        };

        let (mut state, mut version, snapshot_version) = match restored {
            Some((state, version)) => (state, version, Some(version)),
            None => (A::initial_state(stream_id), 0, None),
        };

        let suffix = self.store.read_events_from(stream_id, version + 1).await?;
        let replayed = suffix.len();

        for raw in suffix {
            let event = self.decode_stored(stream_id, version + 1, raw)?;
            state = A::apply(state, &event.data);
            version = event.version;
        }

        debug!(version, replayed, ?snapshot_version, "Loaded stream");

        Ok(LoadedState {
            state,
            version,
            snapshot_version,
        })
    }

    /// Snapshot state, unless the snapshot cannot stand in for a replay
    ///
    /// A snapshot filed under another stream, one ahead of the stream head
    /// and one whose state fails decoding or validation are all skipped.
    async fn restore(
        &self,
        stream_id: &StreamId,
        snapshot: Snapshot<Value>,
    ) -> Result<Option<(A::State, u64)>, StoreError> {
        let version = snapshot.version;
        let head = self.store.current_version(stream_id).await?;

        let restored = if &snapshot.stream_id != stream_id {
            Err(format!("snapshot belongs to {}", snapshot.stream_id))
        } else if version > head {
            Err(format!("snapshot is ahead of stream version {}", head))
        } else {
            serde_json::from_value::<A::State>(snapshot.state)
                .map_err(|e| e.to_string())
                .and_then(|state| state.validate().map(|()| state).map_err(|e| e.to_string()))
        };

        match restored {
            Ok(state) => Ok(Some((state, version))),
            Err(reason) => {
                warn!(stream = %stream_id, version, %reason, "Ignoring unusable snapshot");
                Ok(None)
            }
        }
    }

    fn decode_stored(
        &self,
        stream_id: &StreamId,
        expected_version: u64,
        raw: StoredEvent<Value>,
    ) -> Result<StoredEvent<A::Event>, StoreError> {
        let corrupt = |reason: String| StoreError::Corrupt {
            stream_id: stream_id.to_string(),
            reason,
        };

        if raw.version != expected_version {
            return Err(corrupt(format!(
                "expected version {}, found {}",
                expected_version, raw.version
            )));
        }
        if !self.schemas.knows_event(&raw.event_type) {
            return Err(corrupt(format!("unknown event {}", raw.event_type)));
        }

        let version = raw.version;
        raw.decode::<A::Event>()
            .map_err(|e| corrupt(format!("undecodable event at version {}: {}", version, e)))
    }

    async fn snapshot_if_due(
        &self,
        stream_id: &StreamId,
        version: u64,
        previous: Option<u64>,
        state: &A::State,
    ) -> SnapshotStatus {
        if !self
            .snapshot_policy
            .should_snapshot(stream_id, version, previous.unwrap_or(0))
        {
            return SnapshotStatus::NotDue;
        }

        let result = match serde_json::to_value(state) {
            Ok(value) => {
                self.store
                    .save_snapshot(Snapshot::new(stream_id.clone(), version, value))
                    .await
            }
            Err(err) => Err(StoreError::from(err)),
        };

        match result {
            Ok(()) => {
                info!(version, "Snapshot written");
                SnapshotStatus::Written(version)
            }
            Err(err) => {
                warn!(version, error = %err, "Snapshot write failed");
                SnapshotStatus::Failed(err.to_string())
            }
        }
    }
}

impl AggregateRuntime<PokemonAggregate> {
    /// Build a Pokemon runtime from configuration
    pub fn from_config(config: &RuntimeConfig, store: Arc<dyn EventStore>) -> Result<Self, ConfigError> {
        let random: Arc<dyn RandomSource> = match config.random_seed {
            Some(seed) => Arc::new(ProcessRng::seeded(seed)),
            None => Arc::new(ProcessRng::from_entropy()),
        };

        let runtime = Self::new(
            PokemonAggregate::new(config.catch_policy()?),
            store,
            random,
            SnapshotPolicy::from_threshold(config.snapshot_threshold),
        )?;
        Ok(runtime)
    }
}
