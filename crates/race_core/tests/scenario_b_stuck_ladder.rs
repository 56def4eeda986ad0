//! Spec §8 Scenario B — stuck ladder: an actor boxed into a tiny walkable
//! blob must eventually escalate to a Level-3 teleport and land somewhere
//! walkable, with its stuck counter reset.

mod support;

use bevy_ecs::world::World;

use race_core::config::RaceConfig;
use race_core::driver::Simulation;
use race_core::ecs::{Actor, TrackResource};
use race_core::geometry::Vec2;
use race_core::scenario::build_race;
use race_core::telemetry::{RaceEvent, TeleportReason};
use support::single_blob_track;

#[test]
fn boxed_in_actor_escalates_to_a_level_3_teleport_within_200_ticks() {
    let mut world = World::new();
    let config = RaceConfig::default().with_seed(0x5EED).with_max_players(1);
    let track = single_blob_track(64, 64, (32, 32), 4);
    build_race(&mut world, config, track, &[]).unwrap();

    {
        let mut query = world.query::<&mut Actor>();
        let mut actor = query.single_mut(&mut world);
        actor.pos = Vec2::new(34.0, 34.0);
    }

    let mut sim = Simulation::new(world);
    sim.force_start().unwrap();

    let mut teleported = false;
    for _ in 0..200 {
        let events = sim.run_tick();
        if events.iter().any(|e| {
            matches!(
                e,
                RaceEvent::Teleported { reason: TeleportReason::StuckLadderLevel3, .. }
            )
        }) {
            teleported = true;
            break;
        }
    }

    assert!(teleported, "expected a Level-3 teleport within 200 ticks");

    let mut query = sim.world_mut().query::<&Actor>();
    let actor = query.single(sim.world());
    assert_eq!(actor.stuck_counter, 0);
    let track = &sim.world().resource::<TrackResource>().0;
    assert!(track.is_walkable_with_tolerance(actor.pos, 3.0));
}
