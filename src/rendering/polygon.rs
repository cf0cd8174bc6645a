/// Flat-shaded polygon path: per-face normal, brightness and depth, a
/// stable far-to-near painter's sort, then one filled polygon per face.
///
/// The depth key is the mean view-space z of each face's first three
/// vertices. It is approximate for large or non-planar polygons and there
/// is no per-pixel depth test, so intersecting polygons can draw in the
/// wrong order.
use super::renderer::{DrawStats, Renderer};
use super::shading::shade_color;
use super::surface::DrawSurface;
use crate::camera::Projector;
use crate::error::RenderResult;
use crate::meshing::Mesh;
use crate::perf::FUNCTION_COUNTERS;
use crate::{count_add, count_call, perf_scope};
use glam::Vec3;

/// Per-face data computed fresh for every draw call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderableFace {
    /// Index into `Mesh::faces`
    pub face: usize,
    pub brightness: f32,
    /// Mean view-space z of the first three vertices
    pub depth: f32,
}

impl Renderer {
    /// Draw `mesh` flat-shaded with `base_color` (ARGB; alpha ignored).
    ///
    /// Faces are filled farthest first. Invalid faces reject the whole call
    /// before any pixel is written.
    pub fn draw_solid<S: DrawSurface + ?Sized>(
        &mut self,
        mesh: &Mesh,
        base_color: u32,
        surface: &mut S,
    ) -> RenderResult<DrawStats> {
        perf_scope!("draw_solid");
        count_call!(FUNCTION_COUNTERS.draw_solid_calls);

        let mut stats = DrawStats::default();
        self.prepare_faces(mesh, surface.width(), surface.height(), &mut stats)?;

        let outline = self.config.outline.then_some(self.config.outline_color);
        for renderable in &self.faces {
            let face = &mesh.faces[renderable.face];

            self.polygon.clear();
            self.polygon
                .extend(face.indices.iter().filter_map(|&i| self.projected[i]));

            surface.fill_polygon(&self.polygon, shade_color(base_color, renderable.brightness));
            if let Some(outline_color) = outline {
                surface.stroke_polygon(&self.polygon, outline_color);
            }
            stats.faces_drawn += 1;
        }

        count_add!(FUNCTION_COUNTERS.polygons_filled, stats.faces_drawn as u64);
        log::trace!(
            "draw_solid: {} faces drawn, {} culled, {} at projection pole",
            stats.faces_drawn,
            stats.culled,
            stats.singular
        );
        Ok(stats)
    }

    /// The faces `draw_solid` would fill for `mesh` on a `width` x `height`
    /// surface, in fill order.
    pub fn sorted_faces(
        &mut self,
        mesh: &Mesh,
        width: usize,
        height: usize,
    ) -> RenderResult<&[RenderableFace]> {
        let mut stats = DrawStats::default();
        self.prepare_faces(mesh, width, height, &mut stats)?;
        Ok(&self.faces)
    }

    fn prepare_faces(
        &mut self,
        mesh: &Mesh,
        width: usize,
        height: usize,
        stats: &mut DrawStats,
    ) -> RenderResult<()> {
        self.faces.clear();
        mesh.validate_polygons()?;

        let projector = self.projector_for(width, height);
        self.transform_vertices(&mesh.vertices, &projector);
        self.collect_faces(mesh, &projector, stats);

        // Stable: equal depths keep their input order
        self.faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        Ok(())
    }

    fn collect_faces(&mut self, mesh: &Mesh, projector: &Projector, stats: &mut DrawStats) {
        let eye = Vec3::new(0.0, 0.0, -projector.focal_length);

        for (face_idx, face) in mesh.faces.iter().enumerate() {
            if face.indices.iter().any(|&i| self.projected[i].is_none()) {
                stats.singular += 1;
                continue;
            }
            let Some([a, b, c]) = face.leading_triangle() else {
                continue;
            };

            let (v0, v1, v2) = (self.rotated[a], self.rotated[b], self.rotated[c]);
            let normal = (v1 - v0).cross(v2 - v0);

            if self.config.face_culling && normal.dot(v0 - eye) >= 0.0 {
                stats.culled += 1;
                continue;
            }

            self.faces.push(RenderableFace {
                face: face_idx,
                brightness: self.shading.face_brightness(normal),
                depth: (v0.z + v1.z + v2.z) / 3.0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RendererConfig;
    use crate::error::{GeometryError, RenderError};
    use crate::meshing::Face;
    use crate::rendering::Framebuffer;

    #[test]
    fn cube_sorts_back_to_front_with_stable_ties() {
        let mut renderer = Renderer::default();
        renderer.set_light_direction(Vec3::NEG_Z);
        let cube = Mesh::cube(Vec3::ZERO, 2.0);

        let order: Vec<usize> = renderer
            .sorted_faces(&cube, 100, 100)
            .unwrap()
            .iter()
            .map(|f| f.face)
            .collect();

        // back (+1), top/left (+1/3, input order), bottom/right (-1/3), front (-1)
        assert_eq!(order, vec![1, 3, 5, 2, 4, 0]);
    }

    #[test]
    fn face_culling_drops_faces_pointing_away() {
        let config = RendererConfig {
            face_culling: true,
            ..Default::default()
        };
        let mut renderer = Renderer::new(config).unwrap();
        let cube = Mesh::cube(Vec3::ZERO, 20.0);
        let mut fb = Framebuffer::new(64, 64);

        let stats = renderer.draw_solid(&cube, 0xFF33_33FF, &mut fb).unwrap();
        // From an eye on the z axis only the -z face points back at it
        assert_eq!(stats.culled, 5);
        assert_eq!(stats.faces_drawn, 1);
    }

    #[test]
    fn invalid_face_rejects_whole_call() {
        let mut renderer = Renderer::default();
        let mut cube = Mesh::cube(Vec3::ZERO, 20.0);
        cube.faces.push(Face::new(vec![0, 1]));

        let mut fb = Framebuffer::new(32, 32);
        fb.clear(0xFF00_0000);
        let err = renderer.draw_solid(&cube, 0xFFFF_FFFF, &mut fb).unwrap_err();

        assert_eq!(
            err,
            RenderError::InvalidGeometry(GeometryError::FaceTooSmall { face: 6, len: 2 })
        );
        assert!(fb.color_buffer.iter().all(|&c| c == 0xFF00_0000));
    }

    #[test]
    fn faces_at_projection_pole_are_skipped() {
        let mut renderer = Renderer::default();
        let mesh = Mesh::new(
            vec![
                Vec3::new(-10.0, -10.0, 0.0),
                Vec3::new(10.0, -10.0, 0.0),
                Vec3::new(0.0, 10.0, 0.0),
                Vec3::new(0.0, 0.0, -300.0),
            ],
            vec![Face::triangle(0, 1, 2), Face::triangle(0, 1, 3)],
        );
        let mut fb = Framebuffer::new(32, 32);
        let stats = renderer.draw_solid(&mesh, 0xFFFF_FFFF, &mut fb).unwrap();
        assert_eq!(stats.singular, 1);
        assert_eq!(stats.faces_drawn, 1);
    }
}
