use bevy_ecs::world::World;

use race_core::config::RaceConfig;
use race_core::scenario::build_race;
use race_core::track::Track;

pub fn rect_track_all_walkable(width: u32, height: u32) -> Track {
    let bytes = vec![255u8; width as usize * height as usize * 4];
    Track::from_rgba(width, height, &bytes, 150).expect("fully white raster is always walkable")
}

/// A track walkable only within `radius` px of `center`.
pub fn single_blob_track(width: u32, height: u32, center: (u32, u32), radius: i32) -> Track {
    let mut bytes = vec![0u8; width as usize * height as usize * 4];
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let x = center.0 as i32 + dx;
            let y = center.1 as i32 + dy;
            if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
                continue;
            }
            let idx = (y as u32 * width + x as u32) as usize * 4;
            bytes[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
        }
    }
    Track::from_rgba(width, height, &bytes, 150).expect("blob track always has a walkable center")
}

pub fn world_with(config: RaceConfig, track: Track) -> World {
    let mut world = World::new();
    build_race(&mut world, config, track, &[]).expect("valid test config");
    world
}
