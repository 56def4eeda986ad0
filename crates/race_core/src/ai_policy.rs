//! AI heading bias (spec §4.9): nudges blind-walk actors toward nearby
//! pickups and the goal, gated by a reaction-time cooldown.

use crate::config::AiConfig;
use crate::ecs::Actor;
use crate::geometry::{lerp_angle, Vec2};
use crate::rng::Mt19937;

/// Runs one tick of AI bias for a single actor. No-op for human actors.
///
/// `nearest_booster` and `nearest_skill` are `None` when nothing of that
/// kind is within `booster_bias_radius`.
#[allow(clippy::too_many_arguments)]
pub fn ai_policy_tick(
    actor: &mut Actor,
    goal_pos: Vec2,
    nearest_booster: Option<Vec2>,
    nearest_skill: Option<Vec2>,
    ai: &AiConfig,
    dt_ms: u32,
    rng: &mut Mt19937,
) {
    if !actor.is_ai {
        return;
    }

    if actor.ai_cooldown_ms > 0 {
        actor.ai_cooldown_ms -= dt_ms as i32;
        return;
    }

    if let Some(booster_pos) = nearest_booster {
        if rng.bool(ai.booster_bias) {
            let angle_to_booster = angle_to(actor.pos, booster_pos);
            actor.heading = lerp_angle(actor.heading, angle_to_booster, 0.3);
        }
    }

    if let Some(skill_pos) = nearest_skill {
        if rng.bool(ai.skill_use_p) {
            let angle_to_skill = angle_to(actor.pos, skill_pos);
            actor.heading = lerp_angle(actor.heading, angle_to_skill, 0.3);
        }
    }

    if rng.bool(ai.path_bias) {
        let angle_to_goal = angle_to(actor.pos, goal_pos);
        actor.heading = lerp_angle(actor.heading, angle_to_goal, ai.path_bias * 0.1);
    }

    let reaction_ms = rng.int_range(ai.reaction_ms_min as i64, ai.reaction_ms_max as i64) as f32;
    actor.ai_cooldown_ms = (reaction_ms * ai.skill_level.multiplier()) as i32;
}

fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}
