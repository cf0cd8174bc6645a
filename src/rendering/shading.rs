/// Flat face lighting.
/// Kept separate from the rasterizer so lighting models
/// can evolve independently of the fill paths.
use crate::config::RendererConfig;
use glam::Vec3;

/// Default ambient floor: no face is ever drawn fully black.
pub const AMBIENT_FLOOR: f32 = 0.2;

/// Directional light + ambient floor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShadingConfig {
    /// Direction towards the light (view space). Not required to be unit length.
    pub light_dir: Vec3,
    /// Minimum brightness returned by `face_brightness`.
    pub ambient_floor: f32,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            light_dir: Vec3::new(1.0, 1.0, -1.0),
            ambient_floor: AMBIENT_FLOOR,
        }
    }
}

impl ShadingConfig {
    pub fn from_config(config: &RendererConfig) -> Self {
        Self {
            light_dir: config.light(),
            ambient_floor: config.ambient_floor,
        }
    }

    /// Brightness of a face with the given (unnormalized) normal.
    #[inline]
    pub fn face_brightness(&self, normal: Vec3) -> f32 {
        lighting(normal, self.light_dir, self.ambient_floor)
    }

    /// Halve the light vector, rounding each component to 3 decimals.
    /// Brightness is computed from the normalized light, so this only
    /// changes the stored magnitude.
    pub fn halve_light(&mut self) {
        let halved = self.light_dir * 0.5;
        self.light_dir = (halved * 1000.0).round() / 1000.0;
    }
}

/// `max(floor, dot(n̂, l̂))`, capped at 1.0.
/// A zero-length normal or light yields the floor. The cap wins over a
/// floor above 1.0, and a NaN floor is ignored.
#[inline]
pub fn lighting(normal: Vec3, light: Vec3, floor: f32) -> f32 {
    let n = normal.normalize_or_zero();
    let l = light.normalize_or_zero();
    if n == Vec3::ZERO || l == Vec3::ZERO {
        return floor;
    }
    n.dot(l).max(floor).min(1.0)
}

/// Scale the RGB channels of an ARGB color by `brightness`, flooring each
/// channel. Output is opaque.
#[inline]
pub fn shade_color(base: u32, brightness: f32) -> u32 {
    let brightness = brightness.clamp(0.0, 1.0);
    let scale = |shift: u32| -> u32 {
        let channel = ((base >> shift) & 0xFF) as f32;
        ((channel * brightness).floor() as u32).min(255)
    };
    0xFF00_0000 | (scale(16) << 16) | (scale(8) << 8) | scale(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_normal_is_full_bright() {
        let b = lighting(Vec3::new(0.0, 0.0, -3.0), Vec3::new(0.0, 0.0, -1.0), AMBIENT_FLOOR);
        assert_eq!(b, 1.0);
    }

    #[test]
    fn anti_parallel_normal_hits_floor() {
        let b = lighting(Vec3::Z, Vec3::NEG_Z * 5.0, AMBIENT_FLOOR);
        assert_eq!(b, AMBIENT_FLOOR);
    }

    #[test]
    fn degenerate_vectors_hit_floor() {
        assert_eq!(lighting(Vec3::ZERO, Vec3::Y, AMBIENT_FLOOR), AMBIENT_FLOOR);
        assert_eq!(lighting(Vec3::Y, Vec3::ZERO, AMBIENT_FLOOR), AMBIENT_FLOOR);
    }

    #[test]
    fn out_of_range_floor_never_panics() {
        assert_eq!(lighting(Vec3::Z, Vec3::Z, 1.5), 1.0);
        assert_eq!(lighting(Vec3::Z, Vec3::NEG_Z, 1.5), 1.0);
        assert_eq!(lighting(Vec3::Z, Vec3::Z, f32::NAN), 1.0);
        assert!(lighting(Vec3::Z, Vec3::NEG_Z, f32::NAN).is_finite());

        let shading = ShadingConfig {
            ambient_floor: 3.0,
            ..Default::default()
        };
        assert_eq!(shading.face_brightness(Vec3::NEG_Z), 1.0);
    }

    #[test]
    fn shade_floors_each_channel() {
        // 0x33 = 51, 0xFF = 255; * 0.5 -> 25, 127
        assert_eq!(shade_color(0xFF33_33FF, 0.5), 0xFF19_197F);
        assert_eq!(shade_color(0xFF33_33FF, 1.0), 0xFF33_33FF);
        assert_eq!(shade_color(0x0012_3456, 1.0), 0xFF12_3456);
    }

    #[test]
    fn halving_light_keeps_brightness() {
        let mut shading = ShadingConfig::default();
        let normal = Vec3::new(0.3, 0.8, -0.2);
        let before = shading.face_brightness(normal);
        shading.halve_light();
        assert_eq!(shading.light_dir, Vec3::new(0.5, 0.5, -0.5));
        assert!((shading.face_brightness(normal) - before).abs() < 1e-6);
    }
}
