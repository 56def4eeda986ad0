//! Pairwise collision pass (spec §4.10 step 3): query the spatial grid for
//! neighbors, dedup pairs, resolve shield/magnet rules.

use bevy_ecs::prelude::{Mut, Query, Res, ResMut};

use crate::collision::resolve_collision_pair;
use crate::config::ConfigResource;
use crate::ecs::{Actor, GridResource};

pub fn collision_system(mut actors: Query<&mut Actor>, config: Res<ConfigResource>, mut grid: ResMut<GridResource>) {
    let mut list: Vec<Mut<Actor>> = actors.iter_mut().collect();
    list.sort_by_key(|a| a.index);
    let radius = config.0.movement.player_collision_radius;

    for i in 0..list.len() {
        let pos_i = list[i].pos;
        let handle_i = list[i].index as u32;
        let nearby = grid.0.nearby(pos_i, radius);

        for handle_j in nearby {
            if handle_j == handle_i {
                continue;
            }
            if !grid.0.mark_pair_seen(handle_i, handle_j) {
                continue;
            }
            // Actor indices are a dense 0..n range and `list` is sorted by
            // index, so the handle doubles as a position in `list`.
            let j = handle_j as usize;
            if j >= list.len() {
                continue;
            }
            let (lo, hi) = if i < j { (i, j) } else { (j, i) };
            let (left, right) = list.split_at_mut(hi);
            resolve_collision_pair(&mut left[lo], &mut right[0], radius);
        }
    }
}
