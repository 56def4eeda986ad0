//! Runs a single race to completion and prints a summary, mirroring the
//! upstream scenario-runner example.

use bevy_ecs::world::World;

use race_core::config::RaceConfig;
use race_core::driver::Simulation;
use race_core::ecs::Phase;
use race_core::scenario::build_race;
use race_core::telemetry::RaceEvent;
use race_core::track::Track;

fn main() {
    let width = 800;
    let height = 600;
    let bytes = vec![255u8; width as usize * height as usize * 4];
    let track = Track::from_rgba(width, height, &bytes, 150).expect("demo raster is always valid");

    let config = RaceConfig::default().with_seed(0xC0FFEE).with_max_players(4);

    let mut world = World::new();
    // Actor 0 is human-bid; the rest are AI-filled.
    build_race(&mut world, config, track, &[0]).expect("demo config is always valid");
    let mut sim = Simulation::new(world);
    sim.force_start().expect("a fresh world always starts in Reset");

    let mut total_events = 0usize;
    let mut winner = None;
    for _ in 0..20_000 {
        let events = sim.run_tick();
        total_events += events.len();
        for event in &events {
            if let RaceEvent::RaceResolved { winner: w, .. } = event {
                winner = Some(*w);
            }
        }
        if sim.snapshot().phase == Phase::Resolved {
            break;
        }
    }

    let snapshot = sim.snapshot();
    println!("resolved at tick {}", snapshot.tick);
    println!("winner: {winner:?}");
    println!("total_races so far: {}", snapshot.total_races);
    println!("events emitted: {total_events}");
    sim.tick_timings().print_summary();
    sim.event_metrics().print_summary();
}
