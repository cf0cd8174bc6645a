/// Height-field terrain fill for the voxel store.
/// Column heights come from Perlin noise and are computed on the rayon
/// pool; insertion into the store stays serial.
use super::store::VoxelStore;
use glam::{IVec2, IVec3};
use noise::{NoiseFn, Perlin};
use rayon::prelude::*;

pub const GRASS_COLOR: u32 = 0xFF4C_AF50;
pub const DIRT_COLOR: u32 = 0xFF79_5548;
pub const STONE_COLOR: u32 = 0xFF75_7575;

/// Noise frequency in grid cells
const TERRAIN_SCALE: f64 = 0.08;
/// Peak height above/below y = 0
const TERRAIN_AMPLITUDE: f64 = 4.0;
/// Cells filled below the surface of each column (surface included)
const COLUMN_DEPTH: i32 = 4;

/// Surface height of column `(x, z)`.
#[inline]
pub fn terrain_height(perlin: &Perlin, x: i32, z: i32) -> i32 {
    let noise_value = perlin.get([x as f64 * TERRAIN_SCALE, z as f64 * TERRAIN_SCALE]);
    (noise_value * TERRAIN_AMPLITUDE).round() as i32
}

fn layer_color(depth_below_surface: i32) -> u32 {
    match depth_below_surface {
        0 => GRASS_COLOR,
        1..=2 => DIRT_COLOR,
        _ => STONE_COLOR,
    }
}

impl VoxelStore {
    /// Fill the x/z rectangle `[min, max)` (`IVec2` holds x and z) with
    /// noise terrain. Each column gets a grass cap, dirt beneath it and stone
    /// at the bottom. Returns the number of voxels added.
    pub fn generate_terrain(&mut self, min: IVec2, max: IVec2, seed: u32) -> usize {
        if min.x >= max.x || min.y >= max.y {
            return 0;
        }
        let perlin = Perlin::new(seed);

        let columns: Vec<(i32, i32, i32)> = (min.x..max.x)
            .into_par_iter()
            .flat_map_iter(|x| {
                let perlin = &perlin;
                (min.y..max.y).map(move |z| (x, z, terrain_height(perlin, x, z)))
            })
            .collect();

        for &(x, z, height) in &columns {
            for depth in 0..COLUMN_DEPTH {
                self.add_voxel(IVec3::new(x, height - depth, z), layer_color(depth));
            }
        }

        let added = columns.len() * COLUMN_DEPTH as usize;
        log::debug!(
            "generated {added} terrain voxels over {}x{} columns (seed {seed})",
            max.x - min.x,
            max.y - min.y
        );
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VoxelConfig;

    #[test]
    fn terrain_fills_every_column() {
        let mut store = VoxelStore::new(VoxelConfig::default());
        let added = store.generate_terrain(IVec2::new(-3, -3), IVec2::new(3, 2), 7);
        assert_eq!(added, 6 * 5 * COLUMN_DEPTH as usize);
        assert_eq!(store.voxel_count(), added);
    }

    #[test]
    fn terrain_is_deterministic_per_seed() {
        let mut a = VoxelStore::default();
        let mut b = VoxelStore::default();
        a.generate_terrain(IVec2::ZERO, IVec2::splat(8), 42);
        b.generate_terrain(IVec2::ZERO, IVec2::splat(8), 42);

        let perlin = Perlin::new(42);
        for x in 0..8 {
            for z in 0..8 {
                let top = IVec3::new(x, terrain_height(&perlin, x, z), z);
                let key = a.chunk_key(top);
                let cap = a.chunk(key).and_then(|voxels| voxels.iter().find(|v| v.position == top));
                assert_eq!(cap.map(|v| v.color), Some(GRASS_COLOR));
            }
        }
        assert_eq!(a.voxel_count(), b.voxel_count());
    }

    #[test]
    fn empty_rectangle_adds_nothing() {
        let mut store = VoxelStore::default();
        assert_eq!(store.generate_terrain(IVec2::new(2, 0), IVec2::new(2, 5), 1), 0);
        assert_eq!(store.chunk_count(), 0);
    }
}
