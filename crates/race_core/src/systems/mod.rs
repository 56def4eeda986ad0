//! Per-tick system functions and the fixed schedule that chains them.
//!
//! Unlike the event-driven schedule this is adapted from, every system here
//! runs unconditionally, every tick, in exactly the order spec §4.10 lays
//! out — there is no `run_if` gating on event kind because there is no
//! event kind driving the clock anymore.

mod collisions;
mod lifecycle;
mod movement;
mod pickups;

pub use collisions::collision_system;
pub use lifecycle::{race_fsm_system, spawn_items_system};
pub use movement::{clear_grid_system, per_actor_tick_system};
pub use pickups::pickup_system;

use bevy_ecs::prelude::{Res, Schedule};

use crate::ecs::{Phase, RaceState};

/// Spec §4.8: "no locomotion, spawn, or pickup while in Resolved or Reset".
/// Gates the whole locomotion -> collision -> pickup chain; the grid is
/// still cleared every tick so it never carries stale buckets into the next
/// `Racing` phase, and the FSM itself always runs so it can leave these
/// phases in the first place.
fn is_live_phase(race_state: Res<RaceState>) -> bool {
    !matches!(race_state.phase, Phase::Resolved | Phase::Reset)
}

/// Builds the fixed per-tick chain — clear the grid, run AIPolicy through
/// effect-timer-decrement per actor, resolve collisions, resolve pickups,
/// then advance the race lifecycle — as one named, individually runnable
/// `Schedule` per system, so the driver can time each system's contribution
/// to the tick rather than just the chain as a whole.
pub fn named_tick_schedules() -> Vec<(&'static str, Schedule)> {
    let mut clear_grid = Schedule::default();
    clear_grid.add_systems(clear_grid_system);

    let mut per_actor = Schedule::default();
    per_actor.add_systems(per_actor_tick_system.run_if(is_live_phase));

    let mut collisions = Schedule::default();
    collisions.add_systems(collision_system.run_if(is_live_phase));

    let mut pickups = Schedule::default();
    pickups.add_systems(pickup_system.run_if(is_live_phase));

    let mut spawn_items = Schedule::default();
    spawn_items.add_systems(spawn_items_system);

    let mut race_fsm = Schedule::default();
    race_fsm.add_systems(race_fsm_system);

    vec![
        ("clear_grid", clear_grid),
        ("per_actor_tick", per_actor),
        ("collisions", collisions),
        ("pickups", pickups),
        ("spawn_items", spawn_items),
        ("race_fsm", race_fsm),
    ]
}
