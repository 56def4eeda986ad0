//! Error taxonomy (spec §7): initialization errors and contract violations.
//!
//! Runtime anomalies (NaN position, stuck-counter overflow) are **not**
//! represented here — they are recovered locally (Level-3 teleport, §4.6)
//! and surfaced only as an `ActorResynced` event, never as a `RaceError`.

use std::fmt;

/// The race lifecycle state a contract violation was attempted from/against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseName {
    Betting,
    Racing,
    Resolved,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RaceError {
    /// Track raster has a zero dimension.
    InvalidTrackDimensions { width: u32, height: u32 },
    /// Track construction produced no walkable cells at all.
    EmptyWalkableSet,
    /// A config value named an enum variant the core doesn't recognize.
    UnknownConfigVariant { field: &'static str, value: String },
    /// Attempted to start a race from a phase other than `Reset`.
    NotInResetPhase { actual: PhaseName },
    /// Attempted to schedule/advance to a timestamp earlier than `now`.
    TimeWentBackwards { now: u64, requested: u64 },
    /// Attempted to mutate the Track while a race is in progress.
    TrackMutationDuringRace,
    /// `max_players` exceeds the spec's up-to-six-actor roster (§3, index 0..=5).
    TooManyPlayers { requested: u8, max: u8 },
}

impl fmt::Display for RaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceError::InvalidTrackDimensions { width, height } => {
                write!(f, "invalid track dimensions: {width}x{height}")
            }
            RaceError::EmptyWalkableSet => write!(f, "track has no walkable cells"),
            RaceError::UnknownConfigVariant { field, value } => {
                write!(f, "unknown config variant for {field}: {value}")
            }
            RaceError::NotInResetPhase { actual } => {
                write!(f, "race must be in Reset phase to start, was {actual:?}")
            }
            RaceError::TimeWentBackwards { now, requested } => {
                write!(f, "time cannot move backwards: now={now} requested={requested}")
            }
            RaceError::TrackMutationDuringRace => {
                write!(f, "track cannot be mutated while a race is in progress")
            }
            RaceError::TooManyPlayers { requested, max } => {
                write!(f, "requested {requested} players, but only up to {max} are supported")
            }
        }
    }
}

impl std::error::Error for RaceError {}
