//! Deterministic core of a top-down "blind-horse" racing simulator: up to
//! six actors wander a bitmap-defined track under pseudo-random locomotion,
//! collect power-ups, and race to a goal token.
//!
//! The renderer, asset loaders, auth, history/analytics and multiplayer
//! transport all live outside this crate. What's here is the part where
//! correctness hinges on ordering, tie-breaks and numeric stability: the
//! walkability oracle, the spatial index, the effect-expiry bookkeeping,
//! and the fixed-tick scheduler that ties them together.
//!
//! ## Example
//!
//! ```
//! use bevy_ecs::world::World;
//! use race_core::config::RaceConfig;
//! use race_core::driver::Simulation;
//! use race_core::scenario::build_race;
//! use race_core::track::Track;
//!
//! let bytes = vec![255u8; 400 * 400 * 4];
//! let track = Track::from_rgba(400, 400, &bytes, 150).unwrap();
//! let config = RaceConfig::default().with_seed(0x5EED);
//!
//! let mut world = World::new();
//! build_race(&mut world, config, track, &[]).unwrap();
//! let mut sim = Simulation::new(world);
//! sim.force_start().unwrap();
//! sim.run_n_ticks(10);
//! let snapshot = sim.snapshot();
//! assert_eq!(snapshot.tick, 10);
//! ```

pub mod ai_policy;
pub mod collision;
pub mod config;
pub mod driver;
pub mod ecs;
pub mod effects;
pub mod errors;
pub mod geometry;
pub mod locomotion;
pub mod profiling;
pub mod race_fsm;
pub mod rng;
pub mod scenario;
pub mod spatial;
pub mod stuck_ladder;
pub mod systems;
pub mod telemetry;
pub mod telemetry_export;
pub mod track;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
