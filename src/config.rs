/// Engine configuration, passed explicitly at construction time.
/// Loaded once at startup from TOML; every field has a default so a
/// partial file (or an empty one) is valid.
use crate::error::{RenderError, RenderResult};
use glam::Vec3;
use serde::Deserialize;
use std::path::Path;

/// Renderer parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Focal length of the perspective divide, in pixels.
    pub focal_length: f32,
    /// Direction towards the light, in view space. Need not be normalized.
    pub light_direction: [f32; 3],
    /// Lower bound of face brightness so no face goes fully black.
    pub ambient_floor: f32,
    /// Stroke a translucent outline around every filled polygon.
    pub outline: bool,
    /// ARGB outline color (alpha is honored).
    pub outline_color: u32,
    /// Skip polygons whose normal points away from the eye.
    pub face_culling: bool,
    /// Rasterize textured triangles of either winding.
    pub two_sided_triangles: bool,
    /// Default (pitch, yaw) increment applied by `Renderer::step_rotation`.
    pub rotation_step: [f32; 2],
    /// Radians of rotation per pixel of mouse drag.
    pub mouse_sensitivity: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            focal_length: 300.0,
            light_direction: [1.0, 1.0, -1.0],
            ambient_floor: 0.2,
            outline: true,
            outline_color: 0x5500_0000,
            face_culling: false,
            two_sided_triangles: false,
            rotation_step: [0.01, 0.01],
            mouse_sensitivity: 0.01,
        }
    }
}

impl RendererConfig {
    #[inline]
    pub fn light(&self) -> Vec3 {
        Vec3::from_array(self.light_direction)
    }

    pub fn validate(&self) -> RenderResult<()> {
        if !(self.focal_length.is_finite() && self.focal_length > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "focal_length must be positive, got {}",
                self.focal_length
            )));
        }
        if !(0.0..=1.0).contains(&self.ambient_floor) {
            return Err(RenderError::InvalidConfig(format!(
                "ambient_floor must lie in [0, 1], got {}",
                self.ambient_floor
            )));
        }
        if !self.light().is_finite() {
            return Err(RenderError::InvalidConfig(
                "light_direction must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Voxel store parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VoxelConfig {
    /// Edge length of a chunk, in voxels.
    pub chunk_size: i32,
    /// World-space edge length of a drawn voxel cube. Voxel `p` is drawn centered at `p * voxel_size`.
    pub voxel_size: f32,
    /// Chunk radius used by `VoxelStore::draw_visible_chunks`.
    pub view_distance: i32,
    /// Submit visible voxels far-to-near instead of in storage order.
    pub depth_sort: bool,
}

impl Default for VoxelConfig {
    fn default() -> Self {
        Self {
            chunk_size: 16,
            voxel_size: 20.0,
            view_distance: 2,
            depth_sort: true,
        }
    }
}

impl VoxelConfig {
    pub fn validate(&self) -> RenderResult<()> {
        if self.chunk_size <= 0 {
            return Err(RenderError::InvalidConfig(format!(
                "chunk_size must be positive, got {}",
                self.chunk_size
            )));
        }
        if !(self.voxel_size.is_finite() && self.voxel_size > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "voxel_size must be positive, got {}",
                self.voxel_size
            )));
        }
        if self.view_distance < 0 {
            return Err(RenderError::InvalidConfig(format!(
                "view_distance must not be negative, got {}",
                self.view_distance
            )));
        }
        Ok(())
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub app_name: String,
    pub version: String,
    pub in_dev: bool,
    pub renderer: RendererConfig,
    pub voxel: VoxelConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "Untitled App".to_string(),
            version: "0.0.1".to_string(),
            in_dev: false,
            renderer: RendererConfig::default(),
            voxel: VoxelConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> RenderResult<Self> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> RenderResult<()> {
        self.renderer.validate()?;
        self.voxel.validate()
    }

    /// "Development" or "Production".
    pub fn mode(&self) -> &'static str {
        if self.in_dev {
            "Development"
        } else {
            "Production"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.mode(), "Production");
    }

    #[test]
    fn partial_sections_override_only_named_fields() {
        let config = EngineConfig::from_toml_str(
            r#"
            app_name = "Cubes"
            in_dev = true

            [renderer]
            focal_length = 450.0
            outline = false

            [voxel]
            chunk_size = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.app_name, "Cubes");
        assert_eq!(config.mode(), "Development");
        assert_eq!(config.renderer.focal_length, 450.0);
        assert!(!config.renderer.outline);
        assert_eq!(config.renderer.ambient_floor, 0.2);
        assert_eq!(config.voxel.chunk_size, 8);
        assert_eq!(config.voxel.view_distance, 2);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = EngineConfig::from_toml_str("[voxel]\nchunk_size = 0").unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfig(_)));

        let err = EngineConfig::from_toml_str("[renderer]\nfocal_length = -1.0").unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("[renderer\nfocal_length = 1").unwrap_err();
        assert!(matches!(err, RenderError::ConfigParse(_)));
    }
}
