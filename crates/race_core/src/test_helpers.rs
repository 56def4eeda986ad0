//! Test-only world construction helpers, mirroring the convenience builder
//! pattern used throughout the integration tests.

use bevy_ecs::world::World;

use crate::config::RaceConfig;
use crate::scenario::build_race;
use crate::track::{Track, DEFAULT_THRESHOLD_BRIGHTNESS};

/// A small all-walkable raster, big enough to clear the 40px sampling
/// margin on every side.
pub fn solid_test_track(size: u32) -> Track {
    let bytes = vec![255u8; size as usize * size as usize * 4];
    Track::from_rgba(size, size, &bytes, DEFAULT_THRESHOLD_BRIGHTNESS)
        .expect("a fully white raster is always a valid track")
}

/// A `World` pre-populated via [`build_race`] with a deterministic seed, a
/// small solid-walkable track, and 2 actors — enough for most system tests
/// without pulling in a real track asset.
pub fn create_test_world() -> World {
    let mut world = World::new();
    let config = RaceConfig::default().with_seed(0x5EED).with_max_players(2);
    build_race(&mut world, config, solid_test_track(400), &[]).expect("test world config is always valid");
    world
}
