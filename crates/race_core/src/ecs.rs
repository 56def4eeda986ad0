//! ECS components and resources shared by every system in `systems/`.
//!
//! Mirrors the teacher's component-per-concern layout (`RiderState`,
//! `DriverFatigue`, ... each a small `Copy`-ish struct) but the actor here is
//! a single dense `Actor` component rather than split across many marker
//! components — the simulation mutates kinematics, status and stuck-recovery
//! state together every tick, so splitting them would only add query joins
//! without buying anything.

use std::collections::{HashMap, VecDeque};

use bevy_ecs::prelude::{Component, Entity, Resource};
use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;
use crate::rng::Mt19937;
use crate::spatial::SpatialGrid;
use crate::track::Track;

/// Ring buffer of an actor's last 10 `(pos, tick)` samples, used by the
/// stuck ladder to detect positional stagnation over a 10-tick window.
#[derive(Debug, Clone)]
pub struct RecentPositions {
    buf: VecDeque<(Vec2, u64)>,
}

impl RecentPositions {
    pub const CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self {
            buf: VecDeque::with_capacity(Self::CAPACITY),
        }
    }

    pub fn push(&mut self, pos: Vec2, tick: u64) {
        if self.buf.len() == Self::CAPACITY {
            self.buf.pop_front();
        }
        self.buf.push_back((pos, tick));
    }

    /// The oldest sample still retained, or `None` until the buffer fills.
    pub fn oldest(&self) -> Option<(Vec2, u64)> {
        self.buf.front().copied()
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() == Self::CAPACITY
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl Default for RecentPositions {
    fn default() -> Self {
        Self::new()
    }
}

/// Booster kinds (spec §3 catalog). All apply a `speed_multiplier` for their
/// TTL; only `Poo` is a debuff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoosterKind {
    Antenna,
    Memex,
    Twitter,
    Banana,
    KingKong,
    ToiletPaper,
    Toilet,
    Poo,
}

impl BoosterKind {
    pub const ALL: [BoosterKind; 8] = [
        BoosterKind::Antenna,
        BoosterKind::Memex,
        BoosterKind::Twitter,
        BoosterKind::Banana,
        BoosterKind::KingKong,
        BoosterKind::ToiletPaper,
        BoosterKind::Toilet,
        BoosterKind::Poo,
    ];

    /// Rolls this kind's speed multiplier. `Poo` is a fixed 0.8 debuff;
    /// every other kind rolls uniformly in `[1.2, 2.0]`.
    pub fn roll_speed_multiplier(self, rng: &mut Mt19937) -> f32 {
        match self {
            BoosterKind::Poo => 0.8,
            _ => rng.float_range(1.2, 2.0),
        }
    }

    /// Rolls this kind's TTL in ms. `Poo` is a fixed 4000ms; every other
    /// kind rolls uniformly in `[4000, 7000]`.
    pub fn roll_ttl_ms(self, rng: &mut Mt19937) -> u32 {
        match self {
            BoosterKind::Poo => 4000,
            _ => rng.int_range(4000, 7000) as u32,
        }
    }
}

/// Skill kinds (spec §3 catalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillKind {
    Thunder,
    Fire,
    Bubble,
    Magnet,
    Teleport,
}

impl SkillKind {
    pub const ALL: [SkillKind; 5] = [
        SkillKind::Thunder,
        SkillKind::Fire,
        SkillKind::Bubble,
        SkillKind::Magnet,
        SkillKind::Teleport,
    ];

    /// Default TTL in ms. `Teleport` resolves instantly, hence 0.
    pub fn default_ttl_ms(self) -> u32 {
        match self {
            SkillKind::Thunder => 3000,
            SkillKind::Fire => 5000,
            SkillKind::Bubble => 8000,
            SkillKind::Magnet => 5000,
            SkillKind::Teleport => 0,
        }
    }
}

/// The applied halving this actor is carrying, so expiry can restore the
/// exact original `base_speed` by reversing the stored delta rather than
/// doubling the (possibly since-modified) current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRestore {
    pub delta: f32,
    pub remaining_ms: i64,
}

/// Timed status effects layered onto an actor. Every field is an optional
/// countdown — `Some(remaining_ms)` while active, cleared to `None` on
/// expiry (which is also when the effect is reversed).
#[derive(Debug, Clone, Default)]
pub struct StatusEffects {
    pub booster_kind: Option<BoosterKind>,
    pub booster_remaining_ms: Option<i64>,
    pub paralyzed_remaining_ms: Option<i64>,
    pub shielded_remaining_ms: Option<i64>,
    pub magnetized_remaining_ms: Option<i64>,
    pub fire_restore: Option<FireRestore>,
}

impl StatusEffects {
    pub fn is_paralyzed(&self) -> bool {
        self.paralyzed_remaining_ms.is_some()
    }

    pub fn is_shielded(&self) -> bool {
        self.shielded_remaining_ms.is_some()
    }

    pub fn is_magnetized(&self) -> bool {
        self.magnetized_remaining_ms.is_some()
    }
}

/// Per-actor simulation state. Created at race start, mutated only by the
/// locomotion/effects/stuck-recovery systems, dropped at race reset.
#[derive(Component, Debug, Clone)]
pub struct Actor {
    pub index: u8,
    pub pos: Vec2,
    pub heading: f32,
    /// Spec §4.4 step 1: heading is seeded from the RNG on first use, not at
    /// construction. This flag lets the locomotion system do that lazily.
    pub heading_initialized: bool,
    pub base_speed: f32,
    pub current_speed: f32,
    pub speed_multiplier: f32,
    pub biorhythm_freq: f32,
    pub biorhythm_phase: f32,
    pub recent_positions: RecentPositions,
    pub stuck_counter: u32,
    pub status: StatusEffects,
    pub is_ai: bool,
    pub ai_cooldown_ms: i32,
}

impl Actor {
    pub fn new(index: u8, pos: Vec2, is_ai: bool, rng: &mut Mt19937) -> Self {
        let base_speed = rng.float_range(1.2, 2.0);
        Self {
            index,
            pos,
            heading: 0.0,
            heading_initialized: false,
            base_speed,
            current_speed: base_speed,
            speed_multiplier: 1.0,
            biorhythm_freq: rng.float_range(0.5, 2.0),
            biorhythm_phase: rng.float_range(0.0, std::f32::consts::TAU),
            recent_positions: RecentPositions::new(),
            stuck_counter: 0,
            status: StatusEffects::default(),
            is_ai,
            ai_cooldown_ms: 0,
        }
    }

    /// Current speed ceiling per spec §3: `base_speed * speed_multiplier * 1.5`.
    pub fn speed_cap(&self) -> f32 {
        self.base_speed * self.speed_multiplier * 1.5
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Booster(BoosterKind),
    Skill(SkillKind),
    Goal,
}

/// A booster, skill, or the goal token sitting on the track.
#[derive(Component, Debug, Clone, Copy)]
pub struct WorldItem {
    pub pos: Vec2,
    pub kind: ItemKind,
    pub spawned_tick: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Betting,
    Racing,
    Resolved,
    Reset,
}

/// Race lifecycle resource (spec §4.8). `phase_deadline_tick` means
/// different things per phase: end-of-countdown in `Betting`, the race
/// deadline in `Racing`, end-of-resolution-hold in `Resolved`; unused in
/// `Reset`.
#[derive(Resource, Debug, Clone)]
pub struct RaceState {
    pub phase: Phase,
    pub phase_deadline_tick: u64,
    pub winner: Option<u8>,
    pub total_races: u64,
}

impl Default for RaceState {
    fn default() -> Self {
        Self {
            phase: Phase::Reset,
            phase_deadline_tick: 0,
            winner: None,
            total_races: 0,
        }
    }
}

/// Fixed-tick simulation clock (C10). `tick` and `now_ms` both advance only
/// through the tick driver — nothing else may mutate them.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimClock {
    pub tick: u64,
    pub now_ms: u64,
    pub tick_ms: u32,
}

impl SimClock {
    pub fn new(tick_ms: u32) -> Self {
        Self {
            tick: 0,
            now_ms: 0,
            tick_ms,
        }
    }

    pub fn advance(&mut self) {
        self.tick += 1;
        self.now_ms += self.tick_ms as u64;
    }
}

#[derive(Resource, Debug, Clone)]
pub struct RngResource(pub Mt19937);

#[derive(Resource, Debug, Clone)]
pub struct TrackResource(pub Track);

#[derive(Resource, Debug)]
pub struct GridResource(pub SpatialGrid);

/// Stable `actor.index -> Entity` lookup, since the spatial grid and
/// collision/pickup passes address actors by their small integer index
/// rather than by `Entity`.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActorRoster(pub HashMap<u8, Entity>);

/// The goal token's current position, cached outside the `WorldItem` query
/// so RaceFSM can read it without a query join every tick.
#[derive(Resource, Debug, Clone, Copy)]
pub struct GoalPosition(pub Vec2);

/// Tracks when the next booster/skill should spawn (spec §3: every 3s / 8s
/// while a race is active).
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SpawnTimers {
    pub next_booster_tick: u64,
    pub next_skill_tick: u64,
}
