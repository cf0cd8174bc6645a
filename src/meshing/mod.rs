/// Mesh data handed to the renderer each draw call
pub mod mesh;

pub use mesh::{Face, Mesh, UvTriple, CUBE_CORNERS, CUBE_FACES};
