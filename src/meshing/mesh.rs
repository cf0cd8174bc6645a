/// Plain polygon meshes: object-space vertices plus faces that index into them.
/// Meshes are caller-owned data; the renderer never keeps a reference to one.
use crate::error::GeometryError;
use glam::{Vec2, Vec3};

/// Per-face texture coordinates for the textured path, one pair per corner.
/// Values outside [0, 1] wrap.
pub type UvTriple = [Vec2; 3];

/// Corner indices of the eight cube vertices produced by `Mesh::cube`:
/// 0..4 on the -z side, 4..8 on the +z side.
pub const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Cube quads wound so `(v1 - v0) x (v2 - v0)` points outward.
/// Order: -z (front), +z, -y, +y, +x, -x.
pub const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [3, 7, 6, 2],
    [1, 2, 6, 5],
    [0, 4, 7, 3],
];

/// An ordered list of vertex indices. Winding defines the face normal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
        }
    }

    #[inline]
    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        Self::new(vec![a, b, c])
    }

    #[inline]
    pub fn quad(a: usize, b: usize, c: usize, d: usize) -> Self {
        Self::new(vec![a, b, c, d])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// First three indices, which define the normal and the sort depth.
    #[inline]
    pub fn leading_triangle(&self) -> Option<[usize; 3]> {
        match self.indices.as_slice() {
            [a, b, c, ..] => Some([*a, *b, *c]),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Axis-aligned cube with edge length `size`, 8 vertices and 6 outward-wound quads.
    pub fn cube(center: Vec3, size: f32) -> Self {
        let mut mesh = Self {
            vertices: Vec::with_capacity(CUBE_CORNERS.len()),
            faces: CUBE_FACES
                .iter()
                .map(|&[a, b, c, d]| Face::quad(a, b, c, d))
                .collect(),
        };
        mesh.set_cube_vertices(center, size);
        mesh
    }

    /// Rewrite the vertex list as a cube without touching the faces.
    /// Used to reuse one allocation when drawing many cubes.
    pub fn set_cube_vertices(&mut self, center: Vec3, size: f32) {
        let half = size * 0.5;
        self.vertices.clear();
        self.vertices.extend(
            CUBE_CORNERS
                .iter()
                .map(|&corner| center + Vec3::from_array(corner) * half),
        );
    }

    /// Copy of this mesh with every vertex moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            vertices: self.vertices.iter().map(|&v| v + offset).collect(),
            faces: self.faces.clone(),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check every face has at least three in-range indices.
    pub fn validate_polygons(&self) -> Result<(), GeometryError> {
        for (face_idx, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(GeometryError::FaceTooSmall {
                    face: face_idx,
                    len: face.len(),
                });
            }
            self.check_indices(face_idx, face)?;
        }
        Ok(())
    }

    /// Check every face is an in-range triangle with a matching UV triple.
    pub fn validate_triangles(&self, uv_count: usize) -> Result<(), GeometryError> {
        if uv_count != self.faces.len() {
            return Err(GeometryError::UvCountMismatch {
                faces: self.faces.len(),
                uvs: uv_count,
            });
        }
        for (face_idx, face) in self.faces.iter().enumerate() {
            if face.len() != 3 {
                return Err(GeometryError::NotATriangle {
                    face: face_idx,
                    len: face.len(),
                });
            }
            self.check_indices(face_idx, face)?;
        }
        Ok(())
    }

    fn check_indices(&self, face_idx: usize, face: &Face) -> Result<(), GeometryError> {
        let vertex_count = self.vertices.len();
        match face.indices.iter().find(|&&i| i >= vertex_count) {
            Some(&index) => Err(GeometryError::IndexOutOfRange {
                face: face_idx,
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }
}
