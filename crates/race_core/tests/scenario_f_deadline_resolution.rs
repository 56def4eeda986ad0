//! Spec §8 Scenario F — deadline resolution: betting (30s) + racing (300s)
//! with no goal overlap resolves with no winner, then 5s later resets with
//! `total_races` incremented exactly once.

use race_core::config::GameConfig;
use race_core::ecs::{Phase, RaceState};
use race_core::race_fsm::{race_fsm_tick, ticks_for_seconds};

#[test]
fn no_overlap_resolves_at_the_deadline_then_resets_one_race_later() {
    let game = GameConfig::default();
    let countdown_ticks = ticks_for_seconds(game.countdown_s, game.tick_ms);
    let race_ticks = ticks_for_seconds(game.race_time_limit_s, game.tick_ms);
    let resolution_ticks = ticks_for_seconds(game.resolution_s, game.tick_ms);

    let mut state = RaceState {
        phase: Phase::Betting,
        phase_deadline_tick: countdown_ticks,
        winner: None,
        total_races: 0,
    };

    // Drive tick-by-tick, exactly as the tick driver would, until the race
    // deadline has *strictly* elapsed (spec §4.8: `now > deadline`).
    let mut tick = 0u64;
    while state.phase == Phase::Betting {
        tick += 1;
        race_fsm_tick(&mut state, &[], &game, tick);
    }
    assert_eq!(state.phase, Phase::Racing);
    assert_eq!(state.phase_deadline_tick, countdown_ticks + race_ticks);

    while state.phase == Phase::Racing {
        tick += 1;
        race_fsm_tick(&mut state, &[], &game, tick);
    }
    assert_eq!(state.phase, Phase::Resolved);
    assert_eq!(state.winner, None);
    assert_eq!(state.total_races, 0);
    assert_eq!(tick, countdown_ticks + race_ticks + 1, "resolves one tick past the deadline");

    let resolution_deadline = state.phase_deadline_tick;
    assert_eq!(resolution_deadline, tick + resolution_ticks);

    while state.phase == Phase::Resolved {
        tick += 1;
        race_fsm_tick(&mut state, &[], &game, tick);
    }
    assert_eq!(state.phase, Phase::Reset);
    assert_eq!(state.total_races, 1);
    assert_eq!(tick, resolution_deadline);

    tick += 1;
    let events = race_fsm_tick(&mut state, &[], &game, tick);
    assert_eq!(state.phase, Phase::Betting);
    assert_eq!(events, vec![race_core::telemetry::RaceEvent::RaceReset]);
    assert_eq!(state.total_races, 1, "total_races must not change on the Reset -> Betting edge");
}
