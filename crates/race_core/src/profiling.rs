//! Ambient diagnostics: per-system tick timing and event-kind counters.
//!
//! There is no tracing/log crate in this workspace — diagnostics are a
//! plain in-memory resource printed on demand, the same shape as the
//! upstream simulation's own profiling module.

use std::collections::HashMap;
use std::time::Duration;

use bevy_ecs::prelude::Resource;

use crate::telemetry::RaceEvent;

#[derive(Debug, Clone, Default)]
pub struct SystemTiming {
    pub call_count: u64,
    pub total: Duration,
    pub max: Duration,
}

impl SystemTiming {
    pub fn record(&mut self, elapsed: Duration) {
        self.call_count += 1;
        self.total += elapsed;
        if elapsed > self.max {
            self.max = elapsed;
        }
    }

    pub fn avg(&self) -> Duration {
        if self.call_count == 0 {
            Duration::ZERO
        } else {
            self.total / self.call_count as u32
        }
    }
}

/// Per-system tick timings, keyed by system name.
#[derive(Resource, Debug, Clone, Default)]
pub struct TickTimings {
    timings: HashMap<&'static str, SystemTiming>,
}

impl TickTimings {
    pub fn record(&mut self, system: &'static str, elapsed: Duration) {
        self.timings.entry(system).or_default().record(elapsed);
    }

    pub fn get(&self, system: &str) -> Option<&SystemTiming> {
        self.timings.get(system)
    }

    pub fn print_summary(&self) {
        println!("=== tick timings ===");
        let mut names: Vec<_> = self.timings.keys().collect();
        names.sort();
        for name in names {
            let t = &self.timings[name];
            println!(
                "{name:<20} calls={:<8} avg={:>9.3?} max={:>9.3?}",
                t.call_count,
                t.avg(),
                t.max
            );
        }
    }
}

/// Counts emitted events by kind across the life of a simulation instance.
#[derive(Resource, Debug, Clone, Default)]
pub struct RaceEventMetrics {
    pub events_processed: u64,
    events_by_kind: HashMap<&'static str, u64>,
}

impl RaceEventMetrics {
    pub fn record(&mut self, event: &RaceEvent) {
        self.events_processed += 1;
        *self.events_by_kind.entry(event_kind_name(event)).or_insert(0) += 1;
    }

    pub fn print_summary(&self) {
        println!("=== event counts (total={}) ===", self.events_processed);
        let mut names: Vec<_> = self.events_by_kind.keys().collect();
        names.sort();
        for name in names {
            println!("{name:<20} {}", self.events_by_kind[name]);
        }
    }
}

fn event_kind_name(event: &RaceEvent) -> &'static str {
    match event {
        RaceEvent::RaceStarted => "race_started",
        RaceEvent::BoosterSpawned { .. } => "booster_spawned",
        RaceEvent::SkillSpawned { .. } => "skill_spawned",
        RaceEvent::PickedUp { .. } => "picked_up",
        RaceEvent::SkillCast { .. } => "skill_cast",
        RaceEvent::Teleported { .. } => "teleported",
        RaceEvent::RaceResolved { .. } => "race_resolved",
        RaceEvent::RaceReset => "race_reset",
        RaceEvent::ActorResynced { .. } => "actor_resynced",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_timing_tracks_count_total_and_max() {
        let mut t = SystemTiming::default();
        t.record(Duration::from_millis(10));
        t.record(Duration::from_millis(30));
        assert_eq!(t.call_count, 2);
        assert_eq!(t.total, Duration::from_millis(40));
        assert_eq!(t.max, Duration::from_millis(30));
        assert_eq!(t.avg(), Duration::from_millis(20));
    }

    #[test]
    fn system_timing_avg_is_zero_with_no_samples() {
        let t = SystemTiming::default();
        assert_eq!(t.avg(), Duration::ZERO);
    }

    #[test]
    fn tick_timings_records_per_system_under_its_own_name() {
        let mut timings = TickTimings::default();
        timings.record("collisions", Duration::from_millis(5));
        timings.record("collisions", Duration::from_millis(7));
        timings.record("pickups", Duration::from_millis(1));
        assert_eq!(timings.get("collisions").unwrap().call_count, 2);
        assert_eq!(timings.get("pickups").unwrap().call_count, 1);
        assert!(timings.get("race_fsm").is_none());
    }

    #[test]
    fn race_event_metrics_tallies_by_kind() {
        let mut metrics = RaceEventMetrics::default();
        metrics.record(&RaceEvent::RaceStarted);
        metrics.record(&RaceEvent::RaceReset);
        metrics.record(&RaceEvent::RaceReset);
        assert_eq!(metrics.events_processed, 3);
        assert_eq!(metrics.events_by_kind[&event_kind_name(&RaceEvent::RaceReset)], 2);
    }

    #[test]
    fn time_system_macro_records_elapsed_and_returns_the_block_value() {
        let mut timings = TickTimings::default();
        let result = time_system!(timings, "demo", { 1 + 1 });
        assert_eq!(result, 2);
        assert_eq!(timings.get("demo").unwrap().call_count, 1);
    }
}

/// Times a block and records it into a [`TickTimings`] resource. Mirrors the
/// upstream `time_system!` macro.
#[macro_export]
macro_rules! time_system {
    ($timings:expr, $name:expr, $body:block) => {{
        let __start = std::time::Instant::now();
        let __result = $body;
        $timings.record($name, __start.elapsed());
        __result
    }};
}
