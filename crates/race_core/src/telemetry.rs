//! Append-only event stream and per-tick snapshot (spec §6).

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::ecs::{BoosterKind, ItemKind, Phase, SkillKind};
use crate::geometry::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeleportReason {
    StuckLadderLevel3,
    SkillCast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RaceEvent {
    RaceStarted,
    BoosterSpawned { pos: Vec2, kind: BoosterKind },
    SkillSpawned { pos: Vec2, kind: SkillKind },
    PickedUp { actor: u8, item: ItemKind },
    SkillCast { actor: u8, kind: SkillKind, targets: Vec<u8> },
    Teleported { actor: u8, reason: TeleportReason },
    RaceResolved { winner: Option<u8>, total_races: u64 },
    RaceReset,
    /// Diagnostic-only: a runtime anomaly (NaN position, stuck overflow)
    /// was recovered via Level-3 teleport (spec §7).
    ActorResynced { actor: u8 },
}

/// Append-only per-tick event buffer. The driver drains it into whatever
/// sink the caller wants; nothing inside the core ever reads it back.
#[derive(Resource, Debug, Clone, Default)]
pub struct RaceEventLog {
    events: Vec<RaceEvent>,
}

impl RaceEventLog {
    pub fn push(&mut self, event: RaceEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<RaceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn as_slice(&self) -> &[RaceEvent] {
        &self.events
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub index: u8,
    pub pos: Vec2,
    pub heading: f32,
    pub speed: f32,
    pub paralyzed: bool,
    pub shielded: bool,
    pub magnetized: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub pos: Vec2,
    pub kind: ItemKind,
}

/// Minimal serializable state sufficient to resume at a tick boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub tick: u64,
    pub actors: Vec<ActorSnapshot>,
    pub items: Vec<ItemSnapshot>,
    pub goal_pos: Vec2,
    pub race_remaining_s: f32,
    pub total_races: u64,
}
