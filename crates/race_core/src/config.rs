//! Configuration snapshot (spec §6) and the `RaceConfig` builder that wires
//! it together, mirroring the teacher's `ScenarioParams` layered-config idiom.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub max_players: u8,
    pub race_time_limit_s: u32,
    pub tick_ms: u32,
    pub countdown_s: u32,
    pub resolution_s: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_players: 6,
            race_time_limit_s: 300,
            tick_ms: 16,
            countdown_s: 30,
            resolution_s: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    pub base_speed_min: f32,
    pub base_speed_max: f32,
    pub direction_change_p: f32,
    /// Same as `direction_change_p` but for AI-controlled actors (spec §4.4: 0.016 vs 0.02).
    pub direction_change_p_ai: f32,
    pub direction_change_amount: f32,
    pub biorhythm_amp: f32,
    pub speed_boost_on_escape: f32,
    pub collision_speed_mul: f32,
    pub stuck_threshold_px: f32,
    pub player_collision_radius: f32,
    pub wall_look_ahead: f32,
    pub tolerance_radius: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_speed_min: 1.2,
            base_speed_max: 2.0,
            direction_change_p: 0.02,
            direction_change_p_ai: 0.016,
            direction_change_amount: 0.3,
            biorhythm_amp: 0.15,
            speed_boost_on_escape: 1.5,
            collision_speed_mul: 0.6,
            stuck_threshold_px: 5.0,
            player_collision_radius: 20.0,
            wall_look_ahead: 10.0,
            tolerance_radius: 3.0,
        }
    }
}

/// AI difficulty presets, each scaling reaction time by `skill_multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl SkillLevel {
    /// Multiplier applied to `reaction_ms` to get the actual cooldown reset.
    pub fn multiplier(self) -> f32 {
        match self {
            SkillLevel::Easy => 1.5,
            SkillLevel::Medium => 1.0,
            SkillLevel::Hard => 0.7,
            SkillLevel::Expert => 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    pub skill_level: SkillLevel,
    pub reaction_ms_min: i32,
    pub reaction_ms_max: i32,
    pub booster_bias: f32,
    pub skill_use_p: f32,
    pub path_bias: f32,
    /// Radius (px) within which a booster is considered "nearby" for bias.
    pub booster_bias_radius: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            skill_level: SkillLevel::Medium,
            reaction_ms_min: 150,
            reaction_ms_max: 400,
            booster_bias: 0.4,
            skill_use_p: 0.3,
            path_bias: 0.5,
            booster_bias_radius: 150.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerupsConfig {
    pub booster_spawn_every_s: u32,
    pub skill_spawn_every_s: u32,
}

impl Default for PowerupsConfig {
    fn default() -> Self {
        Self {
            booster_spawn_every_s: 3,
            skill_spawn_every_s: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RngConfig {
    pub seed: Option<u32>,
}

/// Full configuration snapshot consumed by [`crate::scenario::build_race`].
///
/// Every field has a default drawn straight from spec §3/§4; callers only
/// override what they need via the `with_*` builder methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RaceConfig {
    pub game: GameConfig,
    pub movement: MovementConfig,
    pub ai: AiConfig,
    pub powerups: PowerupsConfig,
    pub rng: RngConfig,
}

impl RaceConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.rng.seed = Some(seed);
        self
    }

    pub fn with_tick_ms(mut self, tick_ms: u32) -> Self {
        self.game.tick_ms = tick_ms;
        self
    }

    pub fn with_max_players(mut self, max_players: u8) -> Self {
        self.game.max_players = max_players;
        self
    }

    pub fn with_skill_level(mut self, skill_level: SkillLevel) -> Self {
        self.ai.skill_level = skill_level;
        self
    }

    pub fn with_race_time_limit_s(mut self, race_time_limit_s: u32) -> Self {
        self.game.race_time_limit_s = race_time_limit_s;
        self
    }
}

/// The config snapshot, wrapped once as a `Resource` so systems can pull
/// whichever sub-config they need via `Res<ConfigResource>`.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ConfigResource(pub RaceConfig);
