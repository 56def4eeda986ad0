//! Spec §8 Scenario A — deterministic replay: same seed, same track, same
//! tick sequence must reproduce byte-identical actor snapshots.

mod support;

use race_core::config::RaceConfig;
use race_core::driver::Simulation;
use race_core::scenario::build_race;
use support::rect_track_all_walkable;

fn run_600_ticks(seed: u32) -> race_core::telemetry::Snapshot {
    let mut world = bevy_ecs::world::World::new();
    let config = RaceConfig::default().with_seed(seed).with_max_players(2);
    build_race(&mut world, config, rect_track_all_walkable(64, 64), &[]).unwrap();
    let mut sim = Simulation::new(world);
    sim.force_start().unwrap();
    sim.run_n_ticks(600);
    sim.snapshot()
}

#[test]
fn same_seed_same_track_same_ticks_is_bit_exact() {
    let snap_a = run_600_ticks(0x5EED);
    let snap_b = run_600_ticks(0x5EED);

    assert_eq!(snap_a.actors.len(), 2);
    assert_eq!(snap_a.actors, snap_b.actors);
    assert_eq!(snap_a.tick, snap_b.tick);
    assert_eq!(snap_a.phase, snap_b.phase);
}

#[test]
fn different_seeds_diverge() {
    let snap_a = run_600_ticks(1);
    let snap_b = run_600_ticks(2);
    assert_ne!(snap_a.actors, snap_b.actors);
}
