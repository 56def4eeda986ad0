//! Escalating stuck recovery (spec §4.6): redirect, then local warp, then a
//! full teleport to a random walkable cell.

use crate::config::MovementConfig;
use crate::ecs::Actor;
use crate::geometry::Vec2;
use crate::locomotion::best_direction_search;
use crate::rng::Mt19937;
use crate::track::Track;

const LEVEL_1_MAX: u32 = 60;
const LEVEL_2_MAX: u32 = 120;

const LEVEL_2_RADII: [f32; 5] = [20.0, 30.0, 40.0, 50.0, 60.0];
const LEVEL_2_ANGLE_COUNT: usize = 16;
const LEVEL_2_TOLERANCE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StuckEvent {
    /// Level 3: full teleport, should surface as a `teleported` race event.
    Teleported,
}

/// Checks positional stagnation against the oldest of the last 10 samples
/// and, if still stuck, escalates per the ladder. Returns `Some` only when a
/// level-3 teleport fired (callers emit the corresponding event).
pub fn stuck_ladder_tick(
    actor: &mut Actor,
    track: &Track,
    movement: &MovementConfig,
    rng: &mut Mt19937,
) -> Option<StuckEvent> {
    if !actor.recent_positions.is_full() {
        return None;
    }
    let (oldest_pos, _oldest_tick) = actor.recent_positions.oldest()?;
    if actor.pos.distance(oldest_pos) >= movement.stuck_threshold_px {
        return None;
    }

    // Stagnant this window; the counter itself was already bumped by
    // locomotion's blocked branch, so just read where it lands.
    match actor.stuck_counter {
        c if c > LEVEL_2_MAX => {
            actor.pos = track.random_walkable(rng);
            actor.stuck_counter = 0;
            actor.recent_positions.clear();
            Some(StuckEvent::Teleported)
        }
        c if c > LEVEL_1_MAX => {
            if let Some(landing) = scan_concentric_rings(actor.pos, track) {
                actor.pos = landing;
            }
            actor.stuck_counter = 0;
            actor.recent_positions.clear();
            None
        }
        c if c > LEVEL_1_MAX.saturating_sub(30) => {
            actor.heading = best_direction_search(actor.pos, actor.heading, track);
            actor.current_speed = actor.base_speed * movement.speed_boost_on_escape;
            None
        }
        _ => None,
    }
}

/// Scans rings at radii 20..60 across 16 angles, returning the first point
/// walkable within `LEVEL_2_TOLERANCE`.
fn scan_concentric_rings(pos: Vec2, track: &Track) -> Option<Vec2> {
    for radius in LEVEL_2_RADII {
        for i in 0..LEVEL_2_ANGLE_COUNT {
            let angle = i as f32 * std::f32::consts::TAU / LEVEL_2_ANGLE_COUNT as f32;
            let candidate = pos.offset_polar(angle, radius);
            if track.is_walkable_with_tolerance(candidate, LEVEL_2_TOLERANCE) {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_walkable_cell_track(size: u32, cell: (u32, u32), radius: i32) -> Track {
        let mut bytes = vec![0u8; size as usize * size as usize * 4];
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let x = cell.0 as i32 + dx;
                let y = cell.1 as i32 + dy;
                if x < 0 || y < 0 || x as u32 >= size || y as u32 >= size {
                    continue;
                }
                let idx = (y as u32 * size + x as u32) as usize * 4;
                bytes[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
            }
        }
        Track::from_rgba(size, size, &bytes, crate::track::DEFAULT_THRESHOLD_BRIGHTNESS).unwrap()
    }

    #[test]
    fn level_3_teleport_lands_on_the_only_walkable_cell() {
        let track = single_walkable_cell_track(64, (32, 32), 4);
        let mut rng = Mt19937::seed_from_u32(77);
        let mut actor = Actor::new(0, Vec2::new(34.0, 34.0), false, &mut rng);
        actor.stuck_counter = LEVEL_2_MAX + 1;
        for t in 0..10 {
            actor.recent_positions.push(Vec2::new(34.0, 34.0), t);
        }
        let movement = MovementConfig::default();
        let event = stuck_ladder_tick(&mut actor, &track, &movement, &mut rng);
        assert_eq!(event, Some(StuckEvent::Teleported));
        assert_eq!(actor.stuck_counter, 0);
        assert!(track.is_walkable(actor.pos.x, actor.pos.y));
    }

    #[test]
    fn not_stuck_when_position_has_moved_enough() {
        let track = single_walkable_cell_track(64, (32, 32), 10);
        let mut rng = Mt19937::seed_from_u32(1);
        let mut actor = Actor::new(0, Vec2::new(32.0, 32.0), false, &mut rng);
        actor.stuck_counter = LEVEL_1_MAX + 5;
        for t in 0..10 {
            actor.recent_positions.push(Vec2::new(25.0 + t as f32, 32.0), t);
        }
        actor.pos = Vec2::new(38.0, 32.0);
        let movement = MovementConfig::default();
        let event = stuck_ladder_tick(&mut actor, &track, &movement, &mut rng);
        assert_eq!(event, None);
        assert_eq!(actor.stuck_counter, LEVEL_1_MAX + 5);
    }

    #[test]
    fn a_wider_stuck_threshold_treats_the_same_drift_as_still_stuck() {
        // 6px of drift clears the default 5px threshold (not stuck), but is
        // still inside a widened 10px threshold (stuck) — proves the
        // function reads `movement.stuck_threshold_px` rather than a
        // hardcoded figure.
        let track = single_walkable_cell_track(64, (32, 32), 20);
        let mut rng = Mt19937::seed_from_u32(5);
        let mut actor = Actor::new(0, Vec2::new(32.0, 32.0), false, &mut rng);
        actor.stuck_counter = LEVEL_1_MAX - 5;
        for t in 0..10 {
            actor.recent_positions.push(Vec2::new(32.0, 32.0), t);
        }
        actor.pos = Vec2::new(38.0, 32.0);

        let default_movement = MovementConfig::default();
        let event = stuck_ladder_tick(&mut actor.clone(), &track, &default_movement, &mut rng);
        assert_eq!(event, None);

        let mut widened = MovementConfig::default();
        widened.stuck_threshold_px = 10.0;
        let event = stuck_ladder_tick(&mut actor, &track, &widened, &mut rng);
        assert_eq!(event, None);
        assert_eq!(actor.current_speed, actor.base_speed * widened.speed_boost_on_escape);
    }

    #[test]
    fn level_1_escape_speed_reads_the_configured_boost() {
        let track = single_walkable_cell_track(64, (32, 32), 20);
        let mut rng = Mt19937::seed_from_u32(6);
        let mut actor = Actor::new(0, Vec2::new(32.0, 32.0), false, &mut rng);
        actor.stuck_counter = LEVEL_1_MAX - 1;
        for t in 0..10 {
            actor.recent_positions.push(Vec2::new(32.0, 32.0), t);
        }

        let mut movement = MovementConfig::default();
        movement.speed_boost_on_escape = 2.5;
        stuck_ladder_tick(&mut actor, &track, &movement, &mut rng);
        assert_eq!(actor.current_speed, actor.base_speed * 2.5);
    }
}
