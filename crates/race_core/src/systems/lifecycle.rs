//! World-item spawning and the RaceFSM tick (spec §4.10 steps 5 and the
//! booster/skill spawn policy from §3).

use bevy_ecs::prelude::{Commands, Entity, Mut, Query, Res, ResMut};

use crate::config::ConfigResource;
use crate::ecs::{Actor, BoosterKind, GoalPosition, ItemKind, Phase, RaceState, RngResource, SimClock, SkillKind, SpawnTimers, TrackResource, WorldItem};
use crate::geometry::Vec2;
use crate::race_fsm::{race_fsm_tick, ticks_for_seconds};
use crate::scenario::{centroid_of, pick_spawn_position};
use crate::telemetry::{RaceEvent, RaceEventLog};

/// Same 16px figure used for booster/skill pickups (see `systems::pickups`).
const GOAL_OVERLAP_RADIUS: f32 = 16.0;

pub fn spawn_items_system(
    mut commands: Commands,
    clock: Res<SimClock>,
    race_state: Res<RaceState>,
    track: Res<TrackResource>,
    config: Res<ConfigResource>,
    mut timers: ResMut<SpawnTimers>,
    mut rng: ResMut<RngResource>,
    mut event_log: ResMut<RaceEventLog>,
) {
    if race_state.phase != Phase::Racing {
        return;
    }

    let powerups = &config.0.powerups;

    if clock.tick >= timers.next_booster_tick {
        let kind = *rng.0.choice(&BoosterKind::ALL).expect("BoosterKind::ALL is non-empty");
        let pos = track.0.random_walkable(&mut rng.0);
        commands.spawn(WorldItem {
            pos,
            kind: ItemKind::Booster(kind),
            spawned_tick: clock.tick,
        });
        event_log.push(RaceEvent::BoosterSpawned { pos, kind });
        timers.next_booster_tick = clock.tick + ticks_for_seconds(powerups.booster_spawn_every_s, clock.tick_ms);
    }

    if clock.tick >= timers.next_skill_tick {
        let kind = *rng.0.choice(&SkillKind::ALL).expect("SkillKind::ALL is non-empty");
        let pos = track.0.random_walkable(&mut rng.0);
        commands.spawn(WorldItem {
            pos,
            kind: ItemKind::Skill(kind),
            spawned_tick: clock.tick,
        });
        event_log.push(RaceEvent::SkillSpawned { pos, kind });
        timers.next_skill_tick = clock.tick + ticks_for_seconds(powerups.skill_spawn_every_s, clock.tick_ms);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn race_fsm_system(
    mut race_state: ResMut<RaceState>,
    mut actors: Query<&mut Actor>,
    items: Query<(Entity, &WorldItem)>,
    mut goal: ResMut<GoalPosition>,
    track: Res<TrackResource>,
    config: Res<ConfigResource>,
    clock: Res<SimClock>,
    mut rng: ResMut<RngResource>,
    mut commands: Commands,
    mut event_log: ResMut<RaceEventLog>,
) {
    let mut candidates: Vec<(u8, bool)> = actors
        .iter()
        .filter(|actor| actor.pos.distance(goal.0) < GOAL_OVERLAP_RADIUS)
        .map(|actor| (actor.index, actor.status.is_magnetized()))
        .collect();
    candidates.sort_by_key(|(index, _)| *index);

    let events = race_fsm_tick(&mut race_state, &candidates, &config.0.game, clock.tick);

    // Spec §3/§9: the source picks a *new* spawn anchor on every reset
    // rather than reusing the race-start cluster, and §5 releases the
    // world-item pool on pickup *or* reset — both happen here, on the
    // Reset -> Betting edge (the tick after total_races increments), so
    // actors and the goal are already in place before the countdown starts.
    if events.iter().any(|e| matches!(e, RaceEvent::RaceReset)) {
        respawn_actors_and_goal(&mut actors, &track.0, &mut goal, &mut rng.0);
        for (entity, _) in items.iter() {
            commands.entity(entity).despawn();
        }
    }

    for event in events {
        event_log.push(event);
    }
}

/// Re-rolls every actor's kinematics/biorhythm/status at a fresh random
/// walkable anchor (mirroring `scenario::build_race`'s initial placement)
/// and relocates the goal token to the walkable cell farthest from the new
/// spawn cluster.
fn respawn_actors_and_goal(
    actors: &mut Query<&mut Actor>,
    track: &crate::track::Track,
    goal: &mut GoalPosition,
    rng: &mut crate::rng::Mt19937,
) {
    let mut list: Vec<Mut<Actor>> = actors.iter_mut().collect();
    list.sort_by_key(|a| a.index);

    let mut spawned_positions: Vec<Vec2> = Vec::with_capacity(list.len());
    for actor in list.iter_mut() {
        let pos = pick_spawn_position(track, &spawned_positions, rng);
        spawned_positions.push(pos);
        let index = actor.index;
        let is_ai = actor.is_ai;
        **actor = Actor::new(index, pos, is_ai, rng);
    }

    goal.0 = track.farthest_walkable_from(centroid_of(&spawned_positions));
}
