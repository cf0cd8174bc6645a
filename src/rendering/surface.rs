/// The drawing surface the pipelines write into. The renderer only consumes
/// this trait; `Framebuffer` is the in-crate implementation.
use glam::Vec2;

/// Abstraction over a 2D pixel target supporting polygon fill/stroke and
/// single-pixel writes. Colors are packed ARGB (`0xAARRGGBB`).
pub trait DrawSurface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Fill the closed polygon through `points` (non-zero winding).
    fn fill_polygon(&mut self, points: &[Vec2], color: u32);
    /// Stroke the closed outline through `points`, blending by the color's alpha.
    fn stroke_polygon(&mut self, points: &[Vec2], color: u32);
    /// Overwrite one pixel. Out-of-bounds writes are ignored.
    fn set_pixel(&mut self, x: usize, y: usize, color: u32);
}

/// Convert RGB to opaque ARGB u32
#[inline]
pub const fn rgb_to_u32(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Split ARGB into `[r, g, b]`
#[inline]
pub const fn u32_to_rgb(color: u32) -> [u8; 3] {
    [(color >> 16) as u8, (color >> 8) as u8, color as u8]
}

/// Source-over blend of `src` onto `dst` using the alpha byte of `src`.
#[inline]
pub fn blend_argb(dst: u32, src: u32) -> u32 {
    let alpha = src >> 24;
    match alpha {
        0 => dst,
        0xFF => src,
        _ => {
            let inv = 255 - alpha;
            let channel = |shift: u32| {
                let s = (src >> shift) & 0xFF;
                let d = (dst >> shift) & 0xFF;
                (s * alpha + d * inv) / 255
            };
            0xFF00_0000 | (channel(16) << 16) | (channel(8) << 8) | channel(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_unpack_agree() {
        let c = rgb_to_u32(12, 200, 255);
        assert_eq!(c, 0xFF0C_C8FF);
        assert_eq!(u32_to_rgb(c), [12, 200, 255]);
    }

    #[test]
    fn blend_respects_alpha_extremes() {
        let dst = rgb_to_u32(10, 20, 30);
        assert_eq!(blend_argb(dst, 0x00FF_FFFF), dst);
        assert_eq!(blend_argb(dst, 0xFF11_2233), 0xFF11_2233);
    }

    #[test]
    fn translucent_black_darkens() {
        let dst = rgb_to_u32(255, 255, 255);
        let out = u32_to_rgb(blend_argb(dst, 0x5500_0000));
        // 0x55 = 85, so 255 * 170 / 255 = 170
        assert_eq!(out, [170, 170, 170]);
    }
}
