//! Fixed-tick driver (C10): advances the clock and runs the full per-tick
//! schedule, in contrast to the event-queue driver this was adapted from.
//! There is exactly one clock here — the tick — and callers may invoke it
//! at whatever wall-clock cadence they like; the simulation only ever sees
//! fixed-dt increments.

use bevy_ecs::schedule::Schedule;
use bevy_ecs::world::World;

use crate::ecs::{Actor, GoalPosition, Phase, RaceState, SimClock, WorldItem};
use crate::errors::RaceError;
use crate::profiling::{RaceEventMetrics, TickTimings};
use crate::telemetry::{ActorSnapshot, ItemSnapshot, RaceEvent, RaceEventLog, Snapshot};
use crate::time_system;

use crate::systems::named_tick_schedules;

/// Owns the `World` and the compiled per-tick schedules. Construct via
/// [`crate::scenario::build_race`] followed by [`Simulation::new`].
pub struct Simulation {
    world: World,
    schedules: Vec<(&'static str, Schedule)>,
    timings: TickTimings,
    event_metrics: RaceEventMetrics,
}

impl Simulation {
    pub fn new(world: World) -> Self {
        Self {
            world,
            schedules: named_tick_schedules(),
            timings: TickTimings::default(),
            event_metrics: RaceEventMetrics::default(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Per-system tick timings accumulated since this `Simulation` was built.
    pub fn tick_timings(&self) -> &TickTimings {
        &self.timings
    }

    /// Event-kind counters accumulated since this `Simulation` was built.
    pub fn event_metrics(&self) -> &RaceEventMetrics {
        &self.event_metrics
    }

    /// Advances the clock by one fixed step and runs each system's schedule
    /// in order, timing every one of them into `self.timings`. Returns the
    /// events emitted this tick (already drained from the world-owned log
    /// and tallied into `self.event_metrics`).
    pub fn run_tick(&mut self) -> Vec<RaceEvent> {
        {
            let mut clock = self.world.resource_mut::<SimClock>();
            clock.advance();
        }
        for (name, schedule) in self.schedules.iter_mut() {
            let world = &mut self.world;
            time_system!(self.timings, *name, {
                schedule.run(world);
            });
        }
        let events = self.world.resource_mut::<RaceEventLog>().drain();
        for event in &events {
            self.event_metrics.record(event);
        }
        events
    }

    /// Runs `n` ticks back to back, concatenating their events in order.
    pub fn run_n_ticks(&mut self, n: u32) -> Vec<RaceEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(self.run_tick());
        }
        events
    }

    /// Attempts to force-start a race from `Reset`. Rejects any other phase
    /// without mutating state (spec §7 contract violations).
    pub fn force_start(&mut self) -> Result<(), RaceError> {
        let phase = self.world.resource::<RaceState>().phase;
        if phase != Phase::Reset {
            return Err(RaceError::NotInResetPhase {
                actual: to_phase_name(phase),
            });
        }
        let tick = self.world.resource::<SimClock>().tick;
        let mut state = self.world.resource_mut::<RaceState>();
        state.phase = Phase::Betting;
        state.phase_deadline_tick = tick;
        Ok(())
    }

    pub fn snapshot(&mut self) -> Snapshot {
        let clock = *self.world.resource::<SimClock>();
        let race_state = self.world.resource::<RaceState>().clone();
        let goal_pos = self.world.resource::<GoalPosition>().0;

        let mut actor_query = self.world.query::<&Actor>();
        let mut actors: Vec<ActorSnapshot> = actor_query
            .iter(&self.world)
            .map(|actor| ActorSnapshot {
                index: actor.index,
                pos: actor.pos,
                heading: actor.heading,
                speed: actor.current_speed,
                paralyzed: actor.status.is_paralyzed(),
                shielded: actor.status.is_shielded(),
                magnetized: actor.status.is_magnetized(),
            })
            .collect();
        actors.sort_by_key(|a| a.index);

        let mut item_query = self.world.query::<&WorldItem>();
        let items: Vec<ItemSnapshot> = item_query
            .iter(&self.world)
            .map(|item| ItemSnapshot { pos: item.pos, kind: item.kind })
            .collect();

        let remaining_ticks = race_state.phase_deadline_tick.saturating_sub(clock.tick);
        let race_remaining_s = (remaining_ticks * clock.tick_ms as u64) as f32 / 1000.0;

        Snapshot {
            phase: race_state.phase,
            tick: clock.tick,
            actors,
            items,
            goal_pos,
            race_remaining_s,
            total_races: race_state.total_races,
        }
    }
}

fn to_phase_name(phase: Phase) -> crate::errors::PhaseName {
    match phase {
        Phase::Betting => crate::errors::PhaseName::Betting,
        Phase::Racing => crate::errors::PhaseName::Racing,
        Phase::Resolved => crate::errors::PhaseName::Resolved,
        Phase::Reset => crate::errors::PhaseName::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RaceConfig;
    use crate::scenario::build_race;
    use crate::test_helpers::solid_test_track;

    fn fresh_simulation(seed: u32) -> Simulation {
        let mut world = World::new();
        let config = RaceConfig::default().with_seed(seed).with_max_players(2);
        build_race(&mut world, config, solid_test_track(400), &[]).unwrap();
        Simulation::new(world)
    }

    #[test]
    fn run_tick_advances_the_clock_exactly_once() {
        let mut sim = fresh_simulation(1);
        sim.run_tick();
        assert_eq!(sim.world().resource::<SimClock>().tick, 1);
    }

    #[test]
    fn deterministic_replay_same_seed_same_trajectory() {
        let mut sim_a = fresh_simulation(0x5EED);
        let mut sim_b = fresh_simulation(0x5EED);
        sim_a.run_n_ticks(600);
        sim_b.run_n_ticks(600);
        assert_eq!(sim_a.snapshot().actors, sim_b.snapshot().actors);
    }

    #[test]
    fn run_tick_times_every_system_and_tallies_emitted_events() {
        let mut sim = fresh_simulation(3);
        sim.force_start().unwrap();
        sim.run_n_ticks(5);
        for name in ["clear_grid", "per_actor_tick", "collisions", "pickups", "spawn_items", "race_fsm"] {
            assert_eq!(sim.tick_timings().get(name).unwrap().call_count, 5);
        }
        assert!(sim.event_metrics().events_processed >= 1);
    }

    #[test]
    fn force_start_rejected_outside_reset_phase() {
        let mut sim = fresh_simulation(2);
        sim.force_start().unwrap();
        let err = sim.force_start().unwrap_err();
        assert!(matches!(err, RaceError::NotInResetPhase { .. }));
    }
}
