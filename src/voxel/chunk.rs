/// Chunk addressing for the voxel store.
/// Voxels live on an integer grid; a chunk is the cube of `chunk_size`^3
/// grid cells sharing the same floored quotient.
use glam::{IVec3, Vec3};

/// Integer chunk coordinate. Tuple-valued, so `-0` and `0` are the same key.
pub type ChunkKey = IVec3;

/// A colored unit cell of the voxel grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Voxel {
    pub position: IVec3,
    /// ARGB
    pub color: u32,
}

impl Voxel {
    #[inline]
    pub const fn new(position: IVec3, color: u32) -> Self {
        Self { position, color }
    }

    /// Center of the drawn cube in world units.
    #[inline]
    pub fn world_center(&self, voxel_size: f32) -> Vec3 {
        self.position.as_vec3() * voxel_size
    }
}

/// Chunk containing grid position `pos`: `floor(pos / chunk_size)` per axis.
/// `chunk_size` must be positive.
#[inline]
pub fn chunk_key(pos: IVec3, chunk_size: i32) -> ChunkKey {
    IVec3::new(
        pos.x.div_euclid(chunk_size),
        pos.y.div_euclid(chunk_size),
        pos.z.div_euclid(chunk_size),
    )
}

/// Chunk containing a continuous grid-space position, e.g. a viewer.
#[inline]
pub fn chunk_key_for_point(point: Vec3, chunk_size: i32) -> ChunkKey {
    (point / chunk_size as f32).floor().as_ivec3()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_floor_towards_negative_infinity() {
        assert_eq!(chunk_key(IVec3::new(0, 15, 16), 16), IVec3::new(0, 0, 1));
        assert_eq!(chunk_key(IVec3::new(-1, -16, -17), 16), IVec3::new(-1, -1, -2));
        assert_eq!(chunk_key(IVec3::new(5, -5, 0), 1), IVec3::new(5, -5, 0));
    }

    #[test]
    fn point_keys_match_integer_keys() {
        assert_eq!(chunk_key_for_point(Vec3::new(-0.5, 0.0, 31.9), 16), IVec3::new(-1, 0, 1));
        assert_eq!(chunk_key_for_point(Vec3::new(-0.0, 0.0, 0.0), 16), IVec3::ZERO);
    }

    #[test]
    fn world_center_scales_grid_position() {
        let voxel = Voxel::new(IVec3::new(1, -2, 3), 0xFF00_FF00);
        assert_eq!(voxel.world_center(20.0), Vec3::new(20.0, -40.0, 60.0));
    }
}
