/// Error types returned by the draw paths and the configuration loader.
use thiserror::Error;

/// Geometry that cannot be drawn without reading out of bounds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A polygon needs at least three vertices to define a normal.
    #[error("face {face} has {len} vertices, at least 3 are required")]
    FaceTooSmall { face: usize, len: usize },

    /// A face references a vertex the mesh does not have.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    /// The textured path only rasterizes triangles.
    #[error("textured face {face} has {len} vertices, exactly 3 are required")]
    NotATriangle { face: usize, len: usize },

    /// Every textured face needs exactly one UV triple.
    #[error("mesh has {faces} faces but {uvs} uv triples were supplied")]
    UvCountMismatch { faces: usize, uvs: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),

    /// Texture pixels could not be read. The draw call rendered nothing.
    #[error("texture pixels are unreadable: {0}")]
    TextureUnreadable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(String),

    #[error("i/o error: {0}")]
    Io(String),
}

impl From<toml::de::Error> for RenderError {
    fn from(err: toml::de::Error) -> Self {
        RenderError::ConfigParse(err.to_string())
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io(err.to_string())
    }
}

pub type RenderResult<T> = Result<T, RenderError>;
