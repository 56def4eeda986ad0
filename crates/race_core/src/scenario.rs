//! Wires a [`RaceConfig`] and a [`Track`] into a fresh `World`, mirroring
//! the upstream scenario-builder's job of turning a config snapshot into a
//! populated simulation.

use bevy_ecs::world::World;

use crate::config::{ConfigResource, RaceConfig};
use crate::ecs::{Actor, ActorRoster, GoalPosition, GridResource, RaceState, RngResource, SimClock, SpawnTimers, TrackResource};
use crate::errors::RaceError;
use crate::rng::Mt19937;
use crate::telemetry::RaceEventLog;
use crate::track::Track;

/// Spec §3/§1: "up to six actors (human-bid or AI-filled)", addressed `0..=5`.
pub const MAX_SUPPORTED_PLAYERS: u8 = 6;

/// Builds a fresh simulation `World` for `config` over `track`.
///
/// Spawns `config.game.max_players` actors at distinct random walkable
/// cells (resampling on collision with an already-placed actor, capped at
/// a generous retry budget so a dense/tiny track can't spin forever) and
/// places the goal token at the walkable cell farthest from their centroid.
///
/// `human_indices` names which actor indices are human-bid rather than
/// AI-filled; any index not listed is AI. Indices outside `0..max_players`
/// are ignored.
pub fn build_race(world: &mut World, config: RaceConfig, track: Track, human_indices: &[u8]) -> Result<(), RaceError> {
    if config.game.max_players > MAX_SUPPORTED_PLAYERS {
        return Err(RaceError::TooManyPlayers {
            requested: config.game.max_players,
            max: MAX_SUPPORTED_PLAYERS,
        });
    }

    let seed = config.rng.seed.unwrap_or(0x5EED);
    let mut rng = Mt19937::seed_from_u32(seed);

    let mut roster = ActorRoster::default();
    let mut spawned_positions = Vec::new();

    for index in 0..config.game.max_players {
        let pos = pick_spawn_position(&track, &spawned_positions, &mut rng);
        spawned_positions.push(pos);
        let is_ai = !human_indices.contains(&index);
        let actor = Actor::new(index, pos, is_ai, &mut rng);
        let entity = world.spawn(actor).id();
        roster.0.insert(index, entity);
    }

    let centroid = centroid_of(&spawned_positions);
    let goal_pos = track.farthest_walkable_from(centroid);
    let (width, height) = (track.width() as f32, track.height() as f32);

    world.insert_resource(ConfigResource(config));
    world.insert_resource(TrackResource(track));
    world.insert_resource(GridResource(crate::spatial::SpatialGrid::new(width, height)));
    world.insert_resource(RngResource(rng));
    world.insert_resource(RaceState::default());
    world.insert_resource(SimClock::new(config.game.tick_ms));
    world.insert_resource(GoalPosition(goal_pos));
    world.insert_resource(SpawnTimers::default());
    world.insert_resource(RaceEventLog::default());
    world.insert_resource(roster);

    Ok(())
}

pub(crate) fn pick_spawn_position(track: &Track, taken: &[crate::geometry::Vec2], rng: &mut Mt19937) -> crate::geometry::Vec2 {
    const MAX_ATTEMPTS: u32 = 64;
    const MIN_SEPARATION: f32 = 10.0;

    for _ in 0..MAX_ATTEMPTS {
        let candidate = track.random_walkable(rng);
        if taken.iter().all(|p| p.distance(candidate) >= MIN_SEPARATION) {
            return candidate;
        }
    }
    track.random_walkable(rng)
}

pub(crate) fn centroid_of(positions: &[crate::geometry::Vec2]) -> crate::geometry::Vec2 {
    if positions.is_empty() {
        return crate::geometry::Vec2::ZERO;
    }
    let sum = positions.iter().fold(crate::geometry::Vec2::ZERO, |acc, p| {
        crate::geometry::Vec2::new(acc.x + p.x, acc.y + p.y)
    });
    crate::geometry::Vec2::new(sum.x / positions.len() as f32, sum.y / positions.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RaceConfig;

    fn solid_track(size: u32) -> Track {
        let bytes = vec![255u8; size as usize * size as usize * 4];
        Track::from_rgba(size, size, &bytes, crate::track::DEFAULT_THRESHOLD_BRIGHTNESS).unwrap()
    }

    #[test]
    fn build_race_populates_one_actor_per_max_players() {
        let mut world = World::new();
        let config = RaceConfig::default().with_seed(1).with_max_players(4);
        build_race(&mut world, config, solid_track(400), &[]).unwrap();

        let roster = world.resource::<ActorRoster>();
        assert_eq!(roster.0.len(), 4);
        let mut query = world.query::<&Actor>();
        assert_eq!(query.iter(&world).count(), 4);
    }

    #[test]
    fn build_race_is_deterministic_for_a_fixed_seed() {
        let config = RaceConfig::default().with_seed(99).with_max_players(3);

        let mut world_a = World::new();
        build_race(&mut world_a, config, solid_track(400), &[]).unwrap();
        let mut world_b = World::new();
        build_race(&mut world_b, config, solid_track(400), &[]).unwrap();

        let mut query_a = world_a.query::<&Actor>();
        let mut query_b = world_b.query::<&Actor>();
        let mut positions_a: Vec<_> = query_a.iter(&world_a).map(|a| (a.index, a.pos)).collect();
        let mut positions_b: Vec<_> = query_b.iter(&world_b).map(|a| (a.index, a.pos)).collect();
        positions_a.sort_by_key(|(i, _)| *i);
        positions_b.sort_by_key(|(i, _)| *i);
        assert_eq!(positions_a, positions_b);
    }

    #[test]
    fn human_indices_mark_the_named_actors_as_non_ai() {
        let mut world = World::new();
        let config = RaceConfig::default().with_seed(1).with_max_players(4);
        build_race(&mut world, config, solid_track(400), &[0, 2]).unwrap();

        let mut query = world.query::<&Actor>();
        let mut actors: Vec<_> = query.iter(&world).map(|a| (a.index, a.is_ai)).collect();
        actors.sort_by_key(|(i, _)| *i);
        assert_eq!(actors, vec![(0, false), (1, true), (2, false), (3, true)]);
    }

    #[test]
    fn max_players_above_the_supported_roster_is_rejected() {
        let mut world = World::new();
        let config = RaceConfig::default().with_seed(1).with_max_players(7);
        let err = build_race(&mut world, config, solid_track(400), &[]).unwrap_err();
        assert_eq!(err, RaceError::TooManyPlayers { requested: 7, max: MAX_SUPPORTED_PLAYERS });
    }

    #[test]
    fn max_players_at_the_supported_ceiling_is_accepted() {
        let mut world = World::new();
        let config = RaceConfig::default().with_seed(1).with_max_players(6);
        build_race(&mut world, config, solid_track(400), &[]).unwrap();
        assert_eq!(world.resource::<ActorRoster>().0.len(), 6);
    }
}
