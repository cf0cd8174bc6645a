pub mod framebuffer;
/// Software rendering pipeline
/// Flat-shaded polygons with a painter's sort, and textured triangles
pub mod polygon;
pub mod rasterizer;
pub mod renderer;
pub mod shading;
pub mod surface;
pub mod texture;

pub use framebuffer::Framebuffer;
pub use polygon::RenderableFace;
pub use rasterizer::{barycentric, edge_function};
pub use renderer::{DrawStats, Renderer};
pub use shading::{lighting, shade_color, ShadingConfig, AMBIENT_FLOOR};
pub use surface::{blend_argb, rgb_to_u32, u32_to_rgb, DrawSurface};
pub use texture::{RgbaTexture, TextureSource, TextureView};
