/// Renderer instance: owns the view angles, the light and the scratch
/// buffers shared by the flat-shaded and textured draw paths.
///
/// Every draw call is synchronous and independent. A call that fails
/// leaves the view angles and light untouched; scratch buffers are rebuilt
/// from scratch at the start of each call.
use super::polygon::RenderableFace;
use super::shading::ShadingConfig;
use crate::camera::{Projector, ViewAngles};
use crate::config::RendererConfig;
use crate::error::RenderResult;
use glam::{Vec2, Vec3};
use std::ops::AddAssign;

/// What a draw call did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Faces (polygons or triangles) submitted to the surface
    pub faces_drawn: usize,
    /// Faces rejected by winding (back-face culling or one-sided triangles)
    pub culled: usize,
    /// Faces touching a vertex at the projection pole
    pub singular: usize,
    /// Zero-area textured triangles
    pub degenerate: usize,
    /// Textured triangles whose screen bounds miss the surface
    pub offscreen: usize,
    /// Pixels written by the textured rasterizer
    pub pixels_written: usize,
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, rhs: Self) {
        self.faces_drawn += rhs.faces_drawn;
        self.culled += rhs.culled;
        self.singular += rhs.singular;
        self.degenerate += rhs.degenerate;
        self.offscreen += rhs.offscreen;
        self.pixels_written += rhs.pixels_written;
    }
}

pub struct Renderer {
    pub(super) config: RendererConfig,
    pub(super) view: ViewAngles,
    pub(super) shading: ShadingConfig,
    // Scratch buffers so each vertex is transformed once per call
    // rather than once per face, without reallocating every frame.
    pub(super) rotated: Vec<Vec3>,
    pub(super) projected: Vec<Option<Vec2>>,
    pub(super) faces: Vec<RenderableFace>,
    pub(super) polygon: Vec<Vec2>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_valid_config(RendererConfig::default())
    }
}

impl Renderer {
    /// Create a renderer after validating `config`.
    pub fn new(config: RendererConfig) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: RendererConfig) -> Self {
        Self {
            shading: ShadingConfig::from_config(&config),
            config,
            view: ViewAngles::default(),
            rotated: Vec::new(),
            projected: Vec::new(),
            faces: Vec::new(),
            polygon: Vec::new(),
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn shading(&self) -> &ShadingConfig {
        &self.shading
    }

    #[inline]
    pub fn view_angles(&self) -> ViewAngles {
        self.view
    }

    /// Mutable access for input adapters such as `OrbitController`.
    #[inline]
    pub fn view_angles_mut(&mut self) -> &mut ViewAngles {
        &mut self.view
    }

    pub fn set_view_angles(&mut self, pitch: f32, yaw: f32) {
        self.view = ViewAngles::new(pitch, yaw);
    }

    /// Advance the view angles by an explicit per-frame increment.
    pub fn update_rotation(&mut self, d_pitch: f32, d_yaw: f32) {
        self.view.advance(d_pitch, d_yaw);
    }

    /// Advance by the configured `rotation_step`.
    pub fn step_rotation(&mut self) {
        let [d_pitch, d_yaw] = self.config.rotation_step;
        self.update_rotation(d_pitch, d_yaw);
    }

    #[inline]
    pub fn light_direction(&self) -> Vec3 {
        self.shading.light_dir
    }

    pub fn set_light_direction(&mut self, light: Vec3) {
        self.shading.light_dir = light;
    }

    /// Halve the stored light vector.
    pub fn optimize_light(&mut self) {
        self.shading.halve_light();
    }

    /// Projector for a surface of the given size using the configured focal length.
    #[inline]
    pub fn projector_for(&self, width: usize, height: usize) -> Projector {
        Projector::new(self.config.focal_length, width, height)
    }

    /// Rotate and project every vertex exactly once into the scratch buffers.
    pub(super) fn transform_vertices(&mut self, vertices: &[Vec3], projector: &Projector) {
        let view = self.view;
        self.rotated.clear();
        self.rotated.extend(vertices.iter().map(|&v| view.rotate(v)));
        self.projected.clear();
        self.projected
            .extend(self.rotated.iter().map(|&v| projector.try_project(v)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn new_rejects_invalid_config() {
        let config = RendererConfig {
            focal_length: 0.0,
            ..Default::default()
        };
        assert!(matches!(Renderer::new(config), Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn rotation_is_advanced_explicitly() {
        let mut renderer = Renderer::default();
        assert_eq!(renderer.view_angles(), ViewAngles::default());

        renderer.step_rotation();
        renderer.update_rotation(0.5, -0.25);
        let angles = renderer.view_angles();
        assert!((angles.pitch - 0.51).abs() < 1e-6);
        assert!((angles.yaw + 0.24).abs() < 1e-6);

        renderer.set_view_angles(1.0, 2.0);
        assert_eq!(renderer.view_angles(), ViewAngles::new(1.0, 2.0));
    }

    #[test]
    fn light_comes_from_config_and_is_settable() {
        let mut renderer = Renderer::default();
        assert_eq!(renderer.light_direction(), Vec3::new(1.0, 1.0, -1.0));

        renderer.set_light_direction(Vec3::NEG_Z);
        assert_eq!(renderer.light_direction(), Vec3::NEG_Z);

        renderer.set_light_direction(Vec3::new(2.0, -4.0, 1.0));
        renderer.optimize_light();
        assert_eq!(renderer.light_direction(), Vec3::new(1.0, -2.0, 0.5));
    }

    #[test]
    fn transform_marks_pole_vertices() {
        let mut renderer = Renderer::default();
        let projector = renderer.projector_for(100, 100);
        let vertices = [Vec3::ZERO, Vec3::new(0.0, 0.0, -300.0)];
        renderer.transform_vertices(&vertices, &projector);
        assert_eq!(renderer.projected[0], Some(Vec2::new(50.0, 50.0)));
        assert_eq!(renderer.projected[1], None);
    }
}
