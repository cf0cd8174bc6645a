/// Sparse chunked voxel store.
///
/// Chunks are created lazily on first insert and stay present (possibly
/// empty) until `clear`. Visibility is a coarse cubic neighborhood of chunks
/// around the viewer; there is no frustum or occlusion test.
use super::chunk::{chunk_key, chunk_key_for_point, ChunkKey, Voxel};
use crate::camera::ViewAngles;
use crate::config::VoxelConfig;
use crate::error::RenderResult;
use crate::meshing::Mesh;
use crate::perf::FUNCTION_COUNTERS;
use crate::rendering::{DrawStats, DrawSurface, Renderer};
use crate::{count_add, perf_scope};
use glam::{IVec3, Vec3};
use std::collections::HashMap;

pub struct VoxelStore {
    /// Voxels per chunk, in insertion order
    chunks: HashMap<ChunkKey, Vec<Voxel>>,
    config: VoxelConfig,
}

impl Default for VoxelStore {
    fn default() -> Self {
        Self::new(VoxelConfig::default())
    }
}

impl VoxelStore {
    /// Chunk size is clamped to at least 1 and view distance to at least 0.
    pub fn new(mut config: VoxelConfig) -> Self {
        config.chunk_size = config.chunk_size.max(1);
        config.view_distance = config.view_distance.max(0);
        Self {
            chunks: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &VoxelConfig {
        &self.config
    }

    #[inline]
    pub fn chunk_size(&self) -> i32 {
        self.config.chunk_size
    }

    /// Clamped to at least 0.
    pub fn set_view_distance(&mut self, view_distance: i32) {
        self.config.view_distance = view_distance.max(0);
    }

    #[inline]
    pub fn chunk_key(&self, pos: IVec3) -> ChunkKey {
        chunk_key(pos, self.config.chunk_size)
    }

    /// Append a voxel to its chunk, creating the chunk if needed.
    /// Duplicate positions are kept; `remove_voxel` drops all of them.
    pub fn add_voxel(&mut self, pos: IVec3, color: u32) {
        let key = self.chunk_key(pos);
        self.chunks
            .entry(key)
            .or_default()
            .push(Voxel::new(pos, color));
    }

    /// Remove every voxel at exactly `pos`. Returns how many were removed.
    pub fn remove_voxel(&mut self, pos: IVec3) -> usize {
        let key = self.chunk_key(pos);
        let Some(voxels) = self.chunks.get_mut(&key) else {
            return 0;
        };
        let before = voxels.len();
        voxels.retain(|voxel| voxel.position != pos);
        before - voxels.len()
    }

    /// Voxels stored in chunk `key`, if the chunk exists.
    #[inline]
    pub fn chunk(&self, key: ChunkKey) -> Option<&[Voxel]> {
        self.chunks.get(&key).map(Vec::as_slice)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn voxel_count(&self) -> usize {
        self.chunks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    /// Candidate chunk keys within `distance` chunks of `center` on every
    /// axis, ordered by dx, then dy, then dz. `(2d + 1)^3` keys, minus any
    /// that would fall outside the i32 key range.
    pub fn neighborhood(&self, center: Vec3, distance: i32) -> impl Iterator<Item = ChunkKey> {
        let origin = chunk_key_for_point(center, self.config.chunk_size);
        let d = distance.max(0);
        (-d..=d).flat_map(move |dx| {
            (-d..=d).flat_map(move |dy| {
                (-d..=d).filter_map(move |dz| offset_key(origin, IVec3::new(dx, dy, dz)))
            })
        })
    }

    /// Neighborhood keys that are present in the store.
    pub fn visible_chunk_keys(&self, center: Vec3, distance: i32) -> Vec<ChunkKey> {
        self.neighborhood(center, distance)
            .filter(|key| self.chunks.contains_key(key))
            .collect()
    }

    /// Voxels in the configured view distance, in the order they are drawn.
    ///
    /// With `depth_sort` on, voxels are ordered far-to-near by the view-space
    /// z of their cube centers (stable, so ties keep storage order).
    pub fn visible_voxels(&self, center: Vec3, view: ViewAngles) -> Vec<Voxel> {
        let keys = self.visible_chunk_keys(center, self.config.view_distance);
        self.collect_voxels(&keys, view)
    }

    fn collect_voxels(&self, keys: &[ChunkKey], view: ViewAngles) -> Vec<Voxel> {
        let mut voxels: Vec<Voxel> = keys
            .iter()
            .filter_map(|&key| self.chunk(key))
            .flatten()
            .copied()
            .collect();

        if self.config.depth_sort {
            let voxel_size = self.config.voxel_size;
            let depth = |voxel: &Voxel| view.rotate(voxel.world_center(voxel_size)).z;
            voxels.sort_by(|a, b| depth(b).total_cmp(&depth(a)));
        }
        voxels
    }

    /// Draw every voxel in the visible neighborhood of `center` as a
    /// flat-shaded cube, one `draw_solid` call per voxel.
    pub fn draw_visible_chunks<S: DrawSurface + ?Sized>(
        &self,
        renderer: &mut Renderer,
        center: Vec3,
        surface: &mut S,
    ) -> RenderResult<DrawStats> {
        perf_scope!("draw_visible_chunks");
        let keys = self.visible_chunk_keys(center, self.config.view_distance);
        let voxels = self.collect_voxels(&keys, renderer.view_angles());
        count_add!(FUNCTION_COUNTERS.chunks_visited, keys.len() as u64);
        count_add!(FUNCTION_COUNTERS.voxels_submitted, voxels.len() as u64);

        let voxel_size = self.config.voxel_size;
        let mut cube = Mesh::cube(Vec3::ZERO, voxel_size);
        let mut stats = DrawStats::default();

        for voxel in &voxels {
            cube.set_cube_vertices(voxel.world_center(voxel_size), voxel_size);
            stats += renderer.draw_solid(&cube, voxel.color, surface)?;
        }

        log::debug!(
            "drew {} voxels from {} chunks around chunk {:?}",
            voxels.len(),
            keys.len(),
            chunk_key_for_point(center, self.config.chunk_size)
        );
        Ok(stats)
    }
}

fn offset_key(origin: ChunkKey, offset: IVec3) -> Option<ChunkKey> {
    Some(IVec3::new(
        origin.x.checked_add(offset.x)?,
        origin.y.checked_add(offset.y)?,
        origin.z.checked_add(offset.z)?,
    ))
}
