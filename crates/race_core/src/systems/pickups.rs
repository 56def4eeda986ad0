//! Pickup pass (spec §4.10 step 4): overlap actors against booster/skill
//! world items, applying their effects and despawning the item.

use bevy_ecs::prelude::{Commands, Entity, Mut, Query, Res, ResMut};

use crate::ecs::{Actor, ItemKind, RngResource, SkillKind, TrackResource, WorldItem};
use crate::effects;
use crate::rng::Mt19937;
use crate::telemetry::{RaceEvent, RaceEventLog, TeleportReason};
use crate::track::Track;

/// Shared with the goal-overlap radius in spec §4.8; the spec never states a
/// separate figure for booster/skill pickups so the same 16px is reused.
const PICKUP_RADIUS: f32 = 16.0;

pub fn pickup_system(
    mut actors: Query<&mut Actor>,
    items: Query<(Entity, &WorldItem)>,
    track: Res<TrackResource>,
    mut commands: Commands,
    mut rng: ResMut<RngResource>,
    mut event_log: ResMut<RaceEventLog>,
) {
    let mut list: Vec<Mut<Actor>> = actors.iter_mut().collect();
    list.sort_by_key(|a| a.index);

    for (entity, item) in items.iter() {
        if matches!(item.kind, ItemKind::Goal) {
            continue;
        }

        let claimant = list
            .iter()
            .position(|actor| actor.pos.distance(item.pos) < PICKUP_RADIUS);

        let Some(claimant) = claimant else {
            continue;
        };

        event_log.push(RaceEvent::PickedUp {
            actor: list[claimant].index,
            item: item.kind,
        });

        match item.kind {
            ItemKind::Booster(kind) => {
                effects::apply_booster_pickup(&mut list[claimant], kind, &mut rng.0);
            }
            ItemKind::Skill(kind) => {
                cast_skill(kind, claimant, &mut list, &mut rng.0, &track.0, &mut event_log);
            }
            ItemKind::Goal => unreachable!(),
        }

        commands.entity(entity).despawn();
    }
}

fn cast_skill(
    kind: SkillKind,
    caster_idx: usize,
    list: &mut [Mut<Actor>],
    rng: &mut Mt19937,
    track: &Track,
    event_log: &mut ResMut<RaceEventLog>,
) {
    let caster_index = list[caster_idx].index;
    let ttl_ms = kind.default_ttl_ms();

    match kind {
        SkillKind::Bubble => effects::cast_bubble(&mut list[caster_idx], ttl_ms),
        SkillKind::Magnet => effects::cast_magnet(&mut list[caster_idx], ttl_ms),
        SkillKind::Thunder => {
            let targets = {
                let refs: Vec<&Actor> = list.iter().map(|m| &**m).collect();
                effects::select_thunder_targets(caster_index, &refs, rng)
            };
            for target_index in &targets {
                if let Some(pos) = list.iter().position(|a| a.index == *target_index) {
                    effects::cast_thunder_on_target(&mut list[pos], ttl_ms);
                }
            }
            event_log.push(RaceEvent::SkillCast {
                actor: caster_index,
                kind,
                targets,
            });
        }
        SkillKind::Fire => {
            let targets = {
                let refs: Vec<&Actor> = list.iter().map(|m| &**m).collect();
                effects::select_fire_targets(caster_index, &refs, rng)
            };
            for target_index in &targets {
                if let Some(pos) = list.iter().position(|a| a.index == *target_index) {
                    effects::cast_fire_on_target(&mut list[pos], ttl_ms);
                }
            }
            event_log.push(RaceEvent::SkillCast {
                actor: caster_index,
                kind,
                targets,
            });
        }
        SkillKind::Teleport => {
            for actor in list.iter_mut() {
                actor.pos = track.random_walkable(rng);
                actor.stuck_counter = 0;
                actor.recent_positions.clear();
                actor.heading = rng.float_range(0.0, std::f32::consts::TAU);
                actor.heading_initialized = true;
                event_log.push(RaceEvent::Teleported {
                    actor: actor.index,
                    reason: TeleportReason::SkillCast,
                });
            }
        }
    }
}
