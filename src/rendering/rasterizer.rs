/// Textured triangle rasterizer.
///
/// Bounding-box traversal with edge functions: every pixel whose integer
/// coordinate lies inside or on the triangle gets its UV from barycentric
/// interpolation (affine, not perspective-correct) and is written directly
/// to the surface with nearest-texel sampling.
use super::renderer::{DrawStats, Renderer};
use super::surface::{rgb_to_u32, DrawSurface};
use super::texture::{TextureSource, TextureView};
use crate::error::RenderResult;
use crate::meshing::{Mesh, UvTriple};
use crate::perf::FUNCTION_COUNTERS;
use crate::{count_add, count_call, perf_scope};
use glam::{Vec2, Vec3};

/// Signed parallelogram area of `(a, b, c)` in screen space.
///
/// With y pointing down, triangles that are counter-clockwise in object
/// space (y up, viewed from -z) come out positive.
#[inline]
pub fn edge_function(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

/// Barycentric weights `(alpha, beta, gamma)` of `p` for triangle
/// `(p0, p1, p2)`. `None` for zero or non-finite area.
#[inline]
pub fn barycentric(p0: Vec2, p1: Vec2, p2: Vec2, p: Vec2) -> Option<Vec3> {
    let area = edge_function(p0, p1, p2);
    if area == 0.0 || !area.is_finite() {
        return None;
    }
    Some(Vec3::new(
        edge_function(p1, p2, p) / area,
        edge_function(p2, p0, p) / area,
        edge_function(p0, p1, p) / area,
    ))
}

/// Result of rasterizing one triangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TriangleOutcome {
    Drawn(usize),
    Degenerate,
    Culled,
    /// Bounding box misses the surface entirely
    Offscreen,
}

impl Renderer {
    /// Draw a triangle mesh textured with `texture`, one UV triple per face.
    ///
    /// The texture is read once up front. If it cannot be read, a warning is
    /// logged and the call returns the error without touching the surface;
    /// later calls are unaffected.
    pub fn draw_textured<S, T>(
        &mut self,
        mesh: &Mesh,
        uvs: &[UvTriple],
        texture: &T,
        surface: &mut S,
    ) -> RenderResult<DrawStats>
    where
        S: DrawSurface + ?Sized,
        T: TextureSource + ?Sized,
    {
        perf_scope!("draw_textured");
        count_call!(FUNCTION_COUNTERS.draw_textured_calls);

        let texels = match texture.read_pixels() {
            Ok(texels) => texels,
            Err(err) => {
                count_call!(FUNCTION_COUNTERS.textured_draws_aborted);
                log::warn!("skipping textured draw: {err}");
                return Err(err);
            }
        };
        mesh.validate_triangles(uvs.len())?;

        let projector = self.projector_for(surface.width(), surface.height());
        self.transform_vertices(&mesh.vertices, &projector);

        let two_sided = self.config.two_sided_triangles;
        let mut stats = DrawStats::default();

        for (face, uv) in mesh.faces.iter().zip(uvs) {
            let corners = [face.indices[0], face.indices[1], face.indices[2]]
                .map(|i| self.projected[i]);
            let [Some(p0), Some(p1), Some(p2)] = corners else {
                stats.singular += 1;
                continue;
            };

            match rasterize_triangle(surface, [p0, p1, p2], uv, &texels, two_sided) {
                TriangleOutcome::Drawn(pixels) => {
                    stats.faces_drawn += 1;
                    stats.pixels_written += pixels;
                }
                TriangleOutcome::Degenerate => stats.degenerate += 1,
                TriangleOutcome::Culled => stats.culled += 1,
                TriangleOutcome::Offscreen => stats.offscreen += 1,
            }
        }

        count_add!(FUNCTION_COUNTERS.triangles_rasterized, stats.faces_drawn as u64);
        count_add!(FUNCTION_COUNTERS.triangles_degenerate, stats.degenerate as u64);
        count_add!(FUNCTION_COUNTERS.triangles_culled, stats.culled as u64);
        count_add!(FUNCTION_COUNTERS.pixels_written, stats.pixels_written as u64);
        log::trace!(
            "draw_textured: {} triangles, {} pixels, {} degenerate",
            stats.faces_drawn,
            stats.pixels_written,
            stats.degenerate
        );
        Ok(stats)
    }
}

fn rasterize_triangle<S: DrawSurface + ?Sized>(
    surface: &mut S,
    [p0, p1, p2]: [Vec2; 3],
    uv: &UvTriple,
    texels: &TextureView<'_>,
    two_sided: bool,
) -> TriangleOutcome {
    let signed_area = edge_function(p0, p1, p2);
    if signed_area == 0.0 || !signed_area.is_finite() {
        return TriangleOutcome::Degenerate;
    }
    // Opposite winding: flip every edge so "inside" stays non-negative
    let sign = if signed_area > 0.0 {
        1.0
    } else if two_sided {
        -1.0
    } else {
        return TriangleOutcome::Culled;
    };
    let area = signed_area * sign;

    // Screen bounding box, clamped; max is exclusive
    let min_x = p0.x.min(p1.x).min(p2.x).floor().max(0.0);
    let min_y = p0.y.min(p1.y).min(p2.y).floor().max(0.0);
    let max_x = p0.x.max(p1.x).max(p2.x).ceil().min(surface.width() as f32);
    let max_y = p0.y.max(p1.y).max(p2.y).ceil().min(surface.height() as f32);
    if min_x >= max_x || min_y >= max_y {
        return TriangleOutcome::Offscreen;
    }

    // Precompute edge deltas
    let edge0_dx = (p2.y - p1.y) * sign;
    let edge1_dx = (p0.y - p2.y) * sign;
    let edge2_dx = (p1.y - p0.y) * sign;

    let mut written = 0;
    for y in min_y as usize..max_y as usize {
        // Row start is evaluated exactly; only the x steps accumulate
        let row_start = Vec2::new(min_x, y as f32);
        let mut w0 = edge_function(p1, p2, row_start) * sign;
        let mut w1 = edge_function(p2, p0, row_start) * sign;
        let mut w2 = edge_function(p0, p1, row_start) * sign;

        for x in min_x as usize..max_x as usize {
            if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                let alpha = w0 / area;
                let beta = w1 / area;
                let gamma = w2 / area;
                let tex = uv[0] * alpha + uv[1] * beta + uv[2] * gamma;
                let [r, g, b] = texels.sample(tex.x, tex.y);
                surface.set_pixel(x, y, rgb_to_u32(r, g, b));
                written += 1;
            }
            w0 += edge0_dx;
            w1 += edge1_dx;
            w2 += edge2_dx;
        }
    }

    TriangleOutcome::Drawn(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::texture::RgbaTexture;

    #[test]
    fn edge_function_sign_follows_winding() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(0.0, 4.0);
        let c = Vec2::new(4.0, 0.0);
        assert_eq!(edge_function(a, b, c), 16.0);
        assert_eq!(edge_function(a, c, b), -16.0);
    }

    #[test]
    fn barycentric_at_vertices_and_centroid() {
        let (p0, p1, p2) = (Vec2::new(0.0, 0.0), Vec2::new(0.0, 6.0), Vec2::new(6.0, 0.0));
        assert_eq!(barycentric(p0, p1, p2, p0), Some(Vec3::X));
        assert_eq!(barycentric(p0, p1, p2, p1), Some(Vec3::Y));
        assert_eq!(barycentric(p0, p1, p2, p2), Some(Vec3::Z));

        let centroid = (p0 + p1 + p2) / 3.0;
        let w = barycentric(p0, p1, p2, centroid).unwrap();
        assert!((w - Vec3::splat(1.0 / 3.0)).abs().max_element() < 1e-6);
    }

    #[test]
    fn collinear_points_have_no_weights() {
        let p = Vec2::new(1.0, 1.0);
        assert_eq!(barycentric(Vec2::ZERO, p, p * 2.0, Vec2::new(3.0, 0.0)), None);
    }

    #[test]
    fn triangle_fills_only_inside_pixels() {
        let tex = RgbaTexture::from_fn(1, 1, |_, _| [255, 0, 0]);
        let texels = tex.read_pixels().unwrap();
        let mut fb = crate::rendering::Framebuffer::new(8, 8);
        fb.clear(0);

        // Right triangle with legs of 4 along the axes
        let tri = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 4.0), Vec2::new(4.0, 0.0)];
        let outcome = rasterize_triangle(&mut fb, tri, &[Vec2::ZERO; 3], &texels, false);

        // Integer points with x + y <= 4 inside the exclusive 4x4 box
        assert_eq!(outcome, TriangleOutcome::Drawn(13));
        assert_eq!(fb.pixel(0, 0), Some(0xFFFF_0000));
        assert_eq!(fb.pixel(3, 1), Some(0xFFFF_0000));
        assert_eq!(fb.pixel(3, 2), Some(0));
    }

    #[test]
    fn opposite_winding_is_culled_unless_two_sided() {
        let tex = RgbaTexture::from_fn(1, 1, |_, _| [0, 255, 0]);
        let texels = tex.read_pixels().unwrap();
        let mut fb = crate::rendering::Framebuffer::new(8, 8);

        let tri = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0)];
        let uv = [Vec2::ZERO; 3];
        assert_eq!(
            rasterize_triangle(&mut fb, tri, &uv, &texels, false),
            TriangleOutcome::Culled
        );
        assert_eq!(
            rasterize_triangle(&mut fb, tri, &uv, &texels, true),
            TriangleOutcome::Drawn(13)
        );
    }

    #[test]
    fn offscreen_and_degenerate_triangles_write_nothing() {
        let tex = RgbaTexture::from_fn(1, 1, |_, _| [0, 0, 255]);
        let texels = tex.read_pixels().unwrap();
        let mut fb = crate::rendering::Framebuffer::new(8, 8);
        let uv = [Vec2::ZERO; 3];

        let offscreen = [Vec2::new(-20.0, -20.0), Vec2::new(-20.0, -10.0), Vec2::new(-10.0, -20.0)];
        assert_eq!(
            rasterize_triangle(&mut fb, offscreen, &uv, &texels, false),
            TriangleOutcome::Offscreen
        );

        let line = [Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0)];
        assert_eq!(
            rasterize_triangle(&mut fb, line, &uv, &texels, false),
            TriangleOutcome::Degenerate
        );
    }
}
