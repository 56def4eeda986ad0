//! Spec §8 Scenario C — magnet priority: when a magnetized actor and
//! non-magnetized actors all overlap the goal in the same tick, the
//! magnetized actor wins regardless of arrival order.

use race_core::config::GameConfig;
use race_core::ecs::{Phase, RaceState};
use race_core::race_fsm::race_fsm_tick;

fn racing_state() -> RaceState {
    RaceState {
        phase: Phase::Racing,
        phase_deadline_tick: 100_000,
        winner: None,
        total_races: 0,
    }
}

#[test]
fn magnetized_actor_wins_even_though_others_overlap_first() {
    let mut state = racing_state();
    let game = GameConfig::default();

    // Actors 0 and 1 overlap the goal in arrival order, actor 2 is the
    // magnetized latecomer in the same candidate set.
    let candidates = [(0u8, false), (1u8, false), (2u8, true)];
    let events = race_fsm_tick(&mut state, &candidates, &game, 50);

    assert_eq!(state.winner, Some(2));
    assert!(events
        .iter()
        .any(|e| matches!(e, race_core::telemetry::RaceEvent::RaceResolved { winner: Some(2), .. })));
}

#[test]
fn no_magnetized_candidate_falls_back_to_first_arrival() {
    let mut state = racing_state();
    let game = GameConfig::default();
    let candidates = [(1u8, false), (2u8, false)];
    race_fsm_tick(&mut state, &candidates, &game, 50);
    assert_eq!(state.winner, Some(1));
}
