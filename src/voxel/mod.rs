/// Sparse voxel storage partitioned into cubic chunks
pub mod chunk;
pub mod store;
pub mod terrain;

pub use chunk::{chunk_key, ChunkKey, Voxel};
pub use store::VoxelStore;
pub use terrain::{terrain_height, DIRT_COLOR, GRASS_COLOR, STONE_COLOR};
