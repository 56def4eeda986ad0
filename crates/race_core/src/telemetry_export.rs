//! Canonical JSON encoding of snapshots and event streams (spec §6), used
//! for replay fixtures and the cross-run determinism tests.

use crate::telemetry::{RaceEvent, Snapshot};

/// Serializes a snapshot to pretty-printed JSON.
pub fn snapshot_to_json(snapshot: &Snapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

pub fn snapshot_from_json(json: &str) -> serde_json::Result<Snapshot> {
    serde_json::from_str(json)
}

/// Serializes a full event stream as a JSON array, one event per line's
/// worth of logical content (still a single JSON array on disk).
pub fn events_to_json(events: &[RaceEvent]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(events)
}

pub fn events_from_json(json: &str) -> serde_json::Result<Vec<RaceEvent>> {
    serde_json::from_str(json)
}
