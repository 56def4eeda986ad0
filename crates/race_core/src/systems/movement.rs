//! Per-actor tick: AIPolicy bias, Locomotion, StuckLadder, then the effect
//! timer decrement, all run in ascending-index order before anything is
//! inserted into the spatial grid (spec §4.10 step 2).

use bevy_ecs::prelude::{Mut, Query, Res, ResMut};

use crate::ai_policy::ai_policy_tick;
use crate::config::ConfigResource;
use crate::ecs::{Actor, GoalPosition, GridResource, ItemKind, RngResource, SimClock, TrackResource, WorldItem};
use crate::effects::tick_status_effects;
use crate::locomotion::locomotion_tick;
use crate::stuck_ladder::stuck_ladder_tick;
use crate::telemetry::{RaceEvent, RaceEventLog, TeleportReason};

fn nearest_booster_within(pos: crate::geometry::Vec2, items: &Query<&WorldItem>, radius: f32) -> Option<crate::geometry::Vec2> {
    items
        .iter()
        .filter(|item| matches!(item.kind, ItemKind::Booster(_)))
        .map(|item| item.pos)
        .filter(|item_pos| pos.distance(*item_pos) <= radius)
        .min_by(|a, b| {
            pos.distance_sq(*a)
                .partial_cmp(&pos.distance_sq(*b))
                .expect("distances are always finite")
        })
}

fn nearest_skill_within(pos: crate::geometry::Vec2, items: &Query<&WorldItem>, radius: f32) -> Option<crate::geometry::Vec2> {
    items
        .iter()
        .filter(|item| matches!(item.kind, ItemKind::Skill(_)))
        .map(|item| item.pos)
        .filter(|item_pos| pos.distance(*item_pos) <= radius)
        .min_by(|a, b| {
            pos.distance_sq(*a)
                .partial_cmp(&pos.distance_sq(*b))
                .expect("distances are always finite")
        })
}

#[allow(clippy::too_many_arguments)]
pub fn per_actor_tick_system(
    mut actors: Query<&mut Actor>,
    items: Query<&WorldItem>,
    track: Res<TrackResource>,
    goal: Res<GoalPosition>,
    clock: Res<SimClock>,
    config: Res<ConfigResource>,
    mut grid: ResMut<GridResource>,
    mut rng: ResMut<RngResource>,
    mut event_log: ResMut<RaceEventLog>,
) {
    let mut list: Vec<Mut<Actor>> = actors.iter_mut().collect();
    list.sort_by_key(|a| a.index);

    let movement = &config.0.movement;
    let ai = &config.0.ai;

    for actor in list.iter_mut() {
        let booster_pos = nearest_booster_within(actor.pos, &items, ai.booster_bias_radius);
        let skill_pos = nearest_skill_within(actor.pos, &items, ai.booster_bias_radius);
        ai_policy_tick(actor, goal.0, booster_pos, skill_pos, ai, clock.tick_ms, &mut rng.0);

        locomotion_tick(
            actor,
            &track.0,
            movement,
            clock.tick,
            clock.now_ms,
            clock.tick_ms,
            &mut rng.0,
        );

        // Spec §7: a NaN/∞ position or heading is a runtime anomaly, not a
        // recoverable stuck state — recover it the same way a level-3 stuck
        // teleport would, but flag it distinctly so callers can tell the two
        // apart.
        if !actor.pos.is_finite() || !actor.heading.is_finite() {
            actor.pos = track.0.random_walkable(&mut rng.0);
            actor.heading = 0.0;
            actor.heading_initialized = false;
            actor.stuck_counter = 0;
            actor.recent_positions.clear();
            event_log.push(RaceEvent::ActorResynced { actor: actor.index });
        } else if let Some(_teleported) = stuck_ladder_tick(actor, &track.0, movement, &mut rng.0) {
            event_log.push(RaceEvent::Teleported {
                actor: actor.index,
                reason: TeleportReason::StuckLadderLevel3,
            });
        }

        tick_status_effects(actor, clock.tick_ms);

        grid.0.insert(actor.index as u32, actor.pos, movement.player_collision_radius);
    }
}

pub fn clear_grid_system(mut grid: ResMut<GridResource>) {
    grid.0.clear();
}
