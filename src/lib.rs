pub mod camera;
pub mod config;
pub mod entity;
pub mod error;
pub mod meshing;
pub mod perf;
/// polyraster - small software renderer
/// Flat-shaded polygon meshes, textured triangles and a chunked voxel store,
/// all drawn on the CPU into a 2D pixel surface
pub mod rendering;
pub mod voxel;

pub use camera::{rotate, OrbitController, Projector, ViewAngles, DEFAULT_FOCAL_LENGTH};
pub use config::{EngineConfig, RendererConfig, VoxelConfig};
pub use entity::{Behavior, Entities, Entity, EntityDesc, EntityId, Updatable};
pub use error::{GeometryError, RenderError, RenderResult};
pub use meshing::{Face, Mesh, UvTriple};
pub use perf::{CounterSnapshot, FunctionCounters, FUNCTION_COUNTERS};
pub use rendering::{
    DrawStats, DrawSurface, Framebuffer, RenderableFace, Renderer, RgbaTexture, ShadingConfig,
    TextureSource, TextureView,
};
pub use voxel::{chunk_key, ChunkKey, Voxel, VoxelStore};
