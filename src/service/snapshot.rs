// Copyright (c) 2025 - Cowboy AI, Inc.
//! Snapshot Policy
//!
//! Decides after each command whether to checkpoint the folded state.
//! Snapshots only bound replay cost; a failed snapshot write never fails the
//! command whose events were already appended.

use serde::{Deserialize, Serialize};

use crate::domain::StreamId;

/// When to write snapshots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotPolicy {
    /// Always replay the full stream
    #[default]
    Never,

    /// Snapshot after every command that appended events
    EveryCommand,

    /// Snapshot once this many versions accumulated since the last snapshot
    EveryVersions(u64),
}

impl SnapshotPolicy {
    /// Interpret a configured threshold
    ///
    /// - unset: never snapshot
    /// - zero or negative: snapshot after every command
    /// - positive `n`: snapshot when `n` versions accumulated
    pub fn from_threshold(threshold: Option<i64>) -> Self {
        match threshold {
            None => SnapshotPolicy::Never,
            Some(t) if t <= 0 => SnapshotPolicy::EveryCommand,
            Some(t) => SnapshotPolicy::EveryVersions(t.unsigned_abs()),
        }
    }

    /// Whether a snapshot is due
    ///
    /// `previous_snapshot_version` is 0 when the stream has no snapshot.
    pub fn should_snapshot(
        &self,
        _stream_id: &StreamId,
        new_version: u64,
        previous_snapshot_version: u64,
    ) -> bool {
        match self {
            SnapshotPolicy::Never => false,
            SnapshotPolicy::EveryCommand => true,
            SnapshotPolicy::EveryVersions(n) => {
                new_version.saturating_sub(previous_snapshot_version) >= *n
            }
        }
    }
}

/// What happened to the snapshot after a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SnapshotStatus {
    /// Policy did not ask for a snapshot
    NotDue,

    /// Snapshot written at this version
    Written(u64),

    /// Snapshot write failed; the command still succeeded
    Failed(String),
}
