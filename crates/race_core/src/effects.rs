//! Status-effect catalog (spec §4.7): booster application, skill casting and
//! target selection, and per-tick expiry/reversal. Pure logic over `Actor`
//! values — the ECS wiring (finding which actors overlap which items) lives
//! in `systems::effects`.

use crate::ecs::{Actor, BoosterKind, FireRestore};
use crate::rng::Mt19937;

/// Decrements every active timer on `actor` by `dt_ms` and reverses any
/// effect that crosses zero. Called once per actor per tick, right after
/// locomotion (spec §4.10 step 2) — an expiry that fires this tick only
/// becomes visible to locomotion on the *next* tick.
pub fn tick_status_effects(actor: &mut Actor, dt_ms: u32) {
    let dt = dt_ms as i64;

    if let Some(remaining) = actor.status.booster_remaining_ms.as_mut() {
        *remaining -= dt;
        if *remaining <= 0 {
            actor.status.booster_remaining_ms = None;
            actor.status.booster_kind = None;
            actor.speed_multiplier = 1.0;
        }
    }
    if let Some(remaining) = actor.status.paralyzed_remaining_ms.as_mut() {
        *remaining -= dt;
        if *remaining <= 0 {
            actor.status.paralyzed_remaining_ms = None;
        }
    }
    if let Some(remaining) = actor.status.shielded_remaining_ms.as_mut() {
        *remaining -= dt;
        if *remaining <= 0 {
            actor.status.shielded_remaining_ms = None;
        }
    }
    if let Some(remaining) = actor.status.magnetized_remaining_ms.as_mut() {
        *remaining -= dt;
        if *remaining <= 0 {
            actor.status.magnetized_remaining_ms = None;
        }
    }
    if let Some(restore) = actor.status.fire_restore.as_mut() {
        restore.remaining_ms -= dt;
        if restore.remaining_ms <= 0 {
            // Reverse the exact stored delta rather than re-doubling
            // base_speed, which would amplify if something else touched it
            // meanwhile (spec §9).
            actor.base_speed += restore.delta;
            actor.status.fire_restore = None;
        }
    }
}

/// Booster pickup: overwrites `speed_multiplier` unconditionally (only one
/// booster is ever active; overlap replaces rather than stacks).
pub fn apply_booster_pickup(actor: &mut Actor, kind: BoosterKind, rng: &mut Mt19937) {
    let multiplier = kind.roll_speed_multiplier(rng);
    let ttl_ms = kind.roll_ttl_ms(rng);
    actor.speed_multiplier = multiplier;
    actor.status.booster_kind = Some(kind);
    actor.status.booster_remaining_ms = Some(ttl_ms as i64);
}

pub fn cast_bubble(actor: &mut Actor, ttl_ms: u32) {
    actor.status.shielded_remaining_ms = Some(ttl_ms as i64);
}

pub fn cast_magnet(actor: &mut Actor, ttl_ms: u32) {
    actor.status.magnetized_remaining_ms = Some(ttl_ms as i64);
}

pub fn cast_thunder_on_target(actor: &mut Actor, ttl_ms: u32) {
    actor.status.paralyzed_remaining_ms = Some(ttl_ms as i64);
}

/// Halves `base_speed`, storing the delta so expiry can reverse it exactly.
/// A no-op if the actor already has an active fire debuff — fire does not
/// stack (spec §9: restoring must not amplify).
pub fn cast_fire_on_target(actor: &mut Actor, ttl_ms: u32) {
    if actor.status.fire_restore.is_some() {
        return;
    }
    let delta = actor.base_speed * 0.5;
    actor.base_speed -= delta;
    actor.status.fire_restore = Some(FireRestore {
        delta,
        remaining_ms: ttl_ms as i64,
    });
}

/// Picks up to 3 distinct non-paralyzed actor indices, excluding the caster.
pub fn select_thunder_targets(caster_index: u8, actors: &[&Actor], rng: &mut Mt19937) -> Vec<u8> {
    let mut candidates: Vec<u8> = actors
        .iter()
        .filter(|a| a.index != caster_index && !a.status.is_paralyzed())
        .map(|a| a.index)
        .collect();
    rng.shuffle(&mut candidates);
    candidates.truncate(3);
    candidates
}

/// Picks up to 2 distinct actor indices, excluding the caster.
pub fn select_fire_targets(caster_index: u8, actors: &[&Actor], rng: &mut Mt19937) -> Vec<u8> {
    let mut candidates: Vec<u8> = actors
        .iter()
        .filter(|a| a.index != caster_index)
        .map(|a| a.index)
        .collect();
    rng.shuffle(&mut candidates);
    candidates.truncate(2);
    candidates
}
