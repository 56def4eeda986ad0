//! Per-tick heading drift, look-ahead wall probing and speed modulation
//! (spec §4.4), plus the best-direction search it shares with the stuck
//! ladder (spec §4.5).

use crate::config::MovementConfig;
use crate::ecs::Actor;
use crate::geometry::{lerp_angle, shortest_angle_diff, Vec2};
use crate::rng::Mt19937;
use crate::track::Track;

const PROBE_STEP: f32 = 5.0;
const BEST_DIRECTION_SAMPLE_COUNT: usize = 16;
const BEST_DIRECTION_MAX_RANGE: f32 = 50.0;
const BEST_DIRECTION_CLEAR_FLOOR: f32 = 10.0;

/// Samples 16 headings, picks the one with the largest walkable clear
/// distance (ties broken by smallest angular delta from `current_heading`).
/// Reverses if nothing clears more than 10px.
pub fn best_direction_search(pos: Vec2, current_heading: f32, track: &Track) -> f32 {
    let mut best_heading = current_heading;
    let mut best_clear = -1.0_f32;
    let mut best_delta = f32::MAX;

    for i in 0..BEST_DIRECTION_SAMPLE_COUNT {
        let heading = i as f32 * std::f32::consts::TAU / BEST_DIRECTION_SAMPLE_COUNT as f32;
        let mut clear = 0.0_f32;
        let mut d = PROBE_STEP;
        while d <= BEST_DIRECTION_MAX_RANGE {
            let probe = pos.offset_polar(heading, d);
            if !track.is_walkable(probe.x, probe.y) {
                break;
            }
            clear = d;
            d += PROBE_STEP;
        }
        let delta = shortest_angle_diff(current_heading, heading).abs();
        if clear > best_clear || ((clear - best_clear).abs() < f32::EPSILON && delta < best_delta) {
            best_clear = clear;
            best_delta = delta;
            best_heading = heading;
        }
    }

    if best_clear <= BEST_DIRECTION_CLEAR_FLOOR {
        crate::geometry::normalize_angle(current_heading + std::f32::consts::PI)
    } else {
        best_heading
    }
}

/// Runs one tick of locomotion for a single actor. No-op if the actor is
/// paralyzed (it stays indexed in the grid but doesn't move, spec §4.7).
pub fn locomotion_tick(
    actor: &mut Actor,
    track: &Track,
    movement: &MovementConfig,
    tick: u64,
    now_ms: u64,
    dt_ms: u32,
    rng: &mut Mt19937,
) {
    if actor.status.is_paralyzed() {
        actor.recent_positions.push(actor.pos, tick);
        return;
    }

    if !actor.heading_initialized {
        actor.heading = rng.float_range(0.0, std::f32::consts::TAU);
        actor.heading_initialized = true;
    }

    let change_p = if actor.is_ai {
        movement.direction_change_p_ai
    } else {
        movement.direction_change_p
    };
    if rng.bool(change_p) {
        actor.heading += rng.float_range(-0.5, 0.5) * std::f32::consts::PI * movement.direction_change_amount;
    }

    let step = actor.current_speed * dt_ms as f32 / 16.0;
    let look_ahead = step + movement.wall_look_ahead;

    let mut blocked_at = 1.0_f32;
    let mut d = PROBE_STEP;
    while d <= look_ahead {
        let probe = actor.pos.offset_polar(actor.heading, d);
        if !track.is_walkable_with_tolerance(probe, movement.tolerance_radius) {
            blocked_at = (d - PROBE_STEP) / look_ahead;
            break;
        }
        d += PROBE_STEP;
    }

    if blocked_at >= 1.0 {
        actor.pos = actor.pos.offset_polar(actor.heading, step);
        actor.current_speed = (actor.current_speed + 0.05).min(actor.speed_cap());
        actor.stuck_counter = actor.stuck_counter.saturating_sub(2);
    } else {
        if blocked_at > 0.1 {
            actor.pos = actor.pos.offset_polar(actor.heading, step * blocked_at * 0.8);
        }
        let new_heading = best_direction_search(actor.pos, actor.heading, track);
        actor.heading = lerp_angle(actor.heading, new_heading, 0.3);
        actor.current_speed = actor.base_speed * actor.speed_multiplier * movement.collision_speed_mul;
        actor.stuck_counter += 1;
    }

    // Biorhythm is the final authority on current_speed each tick so the
    // sinusoid stays phase-consistent across restarts (spec §4.4 step 7).
    let phase = now_ms as f32 * 0.0003 * actor.biorhythm_freq + actor.biorhythm_phase;
    actor.current_speed =
        actor.base_speed * actor.speed_multiplier * (1.0 + phase.sin() * movement.biorhythm_amp);

    actor.recent_positions.push(actor.pos, tick);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_track(size: u32) -> Track {
        let bytes = vec![255u8; size as usize * size as usize * 4];
        Track::from_rgba(size, size, &bytes, crate::track::DEFAULT_THRESHOLD_BRIGHTNESS).unwrap()
    }

    #[test]
    fn actor_never_leaves_walkable_cell_on_open_track() {
        let track = solid_track(400);
        let movement = MovementConfig::default();
        let mut rng = Mt19937::seed_from_u32(0x5EED);
        let mut actor = Actor::new(0, Vec2::new(200.0, 200.0), false, &mut rng);
        for tick in 0..300 {
            locomotion_tick(&mut actor, &track, &movement, tick, tick * 16, 16, &mut rng);
            assert!(track.is_walkable(actor.pos.x, actor.pos.y) || track.is_walkable_with_tolerance(actor.pos, movement.tolerance_radius));
        }
    }

    #[test]
    fn paralyzed_actor_does_not_move() {
        let track = solid_track(400);
        let movement = MovementConfig::default();
        let mut rng = Mt19937::seed_from_u32(1);
        let mut actor = Actor::new(0, Vec2::new(200.0, 200.0), false, &mut rng);
        actor.status.paralyzed_remaining_ms = Some(3000);
        let before = actor.pos;
        locomotion_tick(&mut actor, &track, &movement, 0, 0, 16, &mut rng);
        assert_eq!(actor.pos, before);
    }

    #[test]
    fn best_direction_search_reverses_in_a_dead_end() {
        // Walkable only in a small disc; everything 16 headings probe hits a wall quickly.
        let size = 60u32;
        let mut bytes = vec![0u8; size as usize * size as usize * 4];
        for y in 28..32u32 {
            for x in 28..32u32 {
                let idx = (y * size + x) as usize * 4;
                bytes[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
            }
        }
        let track = Track::from_rgba(size, size, &bytes, crate::track::DEFAULT_THRESHOLD_BRIGHTNESS).unwrap();
        let heading = best_direction_search(Vec2::new(30.0, 30.0), 0.0, &track);
        assert!((heading - std::f32::consts::PI).abs() < 1e-3);
    }
}
