//! Betting -> Racing -> Resolved -> Reset lifecycle (spec §4.8).

use crate::config::GameConfig;
use crate::ecs::{Phase, RaceState};
use crate::telemetry::RaceEvent;

/// Converts a duration in whole seconds to tick count at `tick_ms` resolution.
pub fn ticks_for_seconds(seconds: u32, tick_ms: u32) -> u64 {
    (seconds as u64 * 1000) / tick_ms.max(1) as u64
}

/// `(actor_index, is_magnetized)` for every actor currently overlapping the
/// goal token, in ascending index order — the caller's iteration order
/// doubles as "tick arrival order" per spec §5's ordering guarantee.
pub type GoalOverlapCandidates<'a> = &'a [(u8, bool)];

fn resolve_goal_overlap(candidates: GoalOverlapCandidates) -> Option<u8> {
    if let Some((idx, _)) = candidates.iter().find(|(_, magnetized)| *magnetized) {
        // Candidates are in ascending index order and magnet priority only
        // needs the *lowest-index* magnetized actor, so the first magnetized
        // hit already is that actor.
        return Some(*idx);
    }
    candidates.first().map(|(idx, _)| *idx)
}

/// Advances the race lifecycle by one tick. Returns whatever events fired.
///
/// `now > deadline` are both expressed in tick units here; callers compare
/// against `state.phase_deadline_tick` which this function also sets.
pub fn race_fsm_tick(
    state: &mut RaceState,
    goal_overlap: GoalOverlapCandidates,
    game: &GameConfig,
    tick: u64,
) -> Vec<RaceEvent> {
    let mut events = Vec::new();

    match state.phase {
        Phase::Betting => {
            if tick >= state.phase_deadline_tick {
                state.phase = Phase::Racing;
                state.phase_deadline_tick = tick + ticks_for_seconds(game.race_time_limit_s, game.tick_ms);
                events.push(RaceEvent::RaceStarted);
            }
        }
        Phase::Racing => {
            if let Some(winner) = resolve_goal_overlap(goal_overlap) {
                state.phase = Phase::Resolved;
                state.winner = Some(winner);
                state.phase_deadline_tick = tick + ticks_for_seconds(game.resolution_s, game.tick_ms);
                events.push(RaceEvent::RaceResolved {
                    winner: Some(winner),
                    total_races: state.total_races,
                });
            } else if tick > state.phase_deadline_tick {
                state.phase = Phase::Resolved;
                state.winner = None;
                state.phase_deadline_tick = tick + ticks_for_seconds(game.resolution_s, game.tick_ms);
                events.push(RaceEvent::RaceResolved {
                    winner: None,
                    total_races: state.total_races,
                });
            }
        }
        Phase::Resolved => {
            if tick >= state.phase_deadline_tick {
                // total_races increments exactly here, on the Resolved -> Reset edge.
                state.phase = Phase::Reset;
                state.total_races += 1;
            }
        }
        Phase::Reset => {
            state.winner = None;
            state.phase = Phase::Betting;
            state.phase_deadline_tick = tick + ticks_for_seconds(game.countdown_s, game.tick_ms);
            events.push(RaceEvent::RaceReset);
        }
    }

    events
}
