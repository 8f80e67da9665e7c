// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-Memory Event Store

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::EventStore;
use crate::domain::StreamId;
use crate::errors::{StoreError, StoreResult};
use crate::events::{Snapshot, StoredEvent};

type Stream = Arc<RwLock<Vec<StoredEvent<Value>>>>;

/// Event store held in process memory
///
/// Each stream has its own lock. An append holds its stream's write lock for
/// the whole version check and write, so appends to one stream are
/// linearized while appends to different streams never wait on each other.
/// The outer map is only write-locked to add a stream.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    streams: RwLock<HashMap<StreamId, Stream>>,
    snapshots: RwLock<HashMap<StreamId, Snapshot<Value>>>,
}

impl InMemoryEventStore {
    /// Create new in-memory event store
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stream that has at least one event, sorted
    pub async fn stream_ids(&self) -> Vec<StreamId> {
        let streams: Vec<(StreamId, Stream)> = self
            .streams
            .read()
            .await
            .iter()
            .map(|(id, stream)| (id.clone(), stream.clone()))
            .collect();

        let mut ids = Vec::with_capacity(streams.len());
        for (id, stream) in streams {
            if !stream.read().await.is_empty() {
                ids.push(id);
            }
        }
        ids.sort();
        ids
    }

    async fn existing_stream(&self, stream_id: &StreamId) -> Option<Stream> {
        self.streams.read().await.get(stream_id).cloned()
    }

    async fn stream(&self, stream_id: &StreamId) -> Stream {
        if let Some(stream) = self.existing_stream(stream_id).await {
            return stream;
        }
        self.streams
            .write()
            .await
            .entry(stream_id.clone())
            .or_default()
            .clone()
    }

    /// Every stored snapshot, sorted by stream
    pub async fn snapshots(&self) -> Vec<Snapshot<Value>> {
        let mut snapshots: Vec<Snapshot<Value>> =
            self.snapshots.read().await.values().cloned().collect();
        snapshots.sort_by(|a, b| a.stream_id.cmp(&b.stream_id));
        snapshots
    }

    /// Drop every snapshot; replay results must not change
    pub async fn clear_snapshots(&self) {
        self.snapshots.write().await.clear();
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn load_snapshot(&self, stream_id: &StreamId) -> StoreResult<Option<Snapshot<Value>>> {
        Ok(self.snapshots.read().await.get(stream_id).cloned())
    }

    async fn read_events_from(
        &self,
        stream_id: &StreamId,
        from_version: u64,
    ) -> StoreResult<Vec<StoredEvent<Value>>> {
        let Some(stream) = self.existing_stream(stream_id).await else {
            return Ok(Vec::new());
        };
        let events = stream
            .read()
            .await
            .iter()
            .filter(|e| e.version >= from_version)
            .cloned()
            .collect();
        Ok(events)
    }

    async fn append(
        &self,
        stream_id: &StreamId,
        expected_version: u64,
        events: Vec<StoredEvent<Value>>,
    ) -> StoreResult<u64> {
        let stream = self.stream(stream_id).await;
        let mut stored = stream.write().await;
        let current = stored.len() as u64;

        if current != expected_version {
            return Err(StoreError::ConcurrencyConflict {
                stream_id: stream_id.to_string(),
                expected: expected_version,
                actual: current,
            });
        }

        for (offset, event) in events.iter().enumerate() {
            let want = expected_version + offset as u64 + 1;
            if event.version != want || &event.stream_id != stream_id {
                return Err(StoreError::Corrupt {
                    stream_id: stream_id.to_string(),
                    reason: format!(
                        "event {} at {}#{} does not continue the stream at version {}",
                        event.event_type, event.stream_id, event.version, want
                    ),
                });
            }
        }

        let new_version = expected_version + events.len() as u64;
        stored.extend(events);
        debug!(stream = %stream_id, version = new_version, "Appended events");

        Ok(new_version)
    }

    async fn save_snapshot(&self, snapshot: Snapshot<Value>) -> StoreResult<()> {
        let mut snapshots = self.snapshots.write().await;
        let is_newer = snapshots
            .get(&snapshot.stream_id)
            .map_or(true, |existing| existing.version <= snapshot.version);

        if is_newer {
            snapshots.insert(snapshot.stream_id.clone(), snapshot);
        }
        Ok(())
    }

    async fn current_version(&self, stream_id: &StreamId) -> StoreResult<u64> {
        let Some(stream) = self.existing_stream(stream_id).await else {
            return Ok(0);
        };
        let version = stream.read().await.len() as u64;
        Ok(version)
    }
}
