/// Texture sources for the textured triangle path.
/// Pixels are read once per draw call through `TextureSource::read_pixels`;
/// a source that cannot expose its pixels fails that call only.
use crate::error::{RenderError, RenderResult};
use noise::{NoiseFn, Perlin};

/// Borrowed RGBA8 pixel data, row-major, `width * height * 4` bytes.
#[derive(Copy, Clone, Debug)]
pub struct TextureView<'a> {
    pub width: usize,
    pub height: usize,
    pub rgba: &'a [u8],
}

impl<'a> TextureView<'a> {
    /// Validate dimensions against the byte length.
    pub fn new(width: usize, height: usize, rgba: &'a [u8]) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::TextureUnreadable(format!(
                "texture has empty dimensions {width}x{height}"
            )));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| RenderError::TextureUnreadable("texture size overflows".into()))?;
        if rgba.len() != expected {
            return Err(RenderError::TextureUnreadable(format!(
                "expected {expected} bytes for {width}x{height} RGBA, got {}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Texel coordinates for `(u, v)` with wrap-around addressing.
    /// Negative and non-finite coordinates wrap into range as well.
    #[inline]
    pub fn texel_coords(&self, u: f32, v: f32) -> (usize, usize) {
        (wrap(u, self.width), wrap(v, self.height))
    }

    /// Sample RGB at `(u, v)`, nearest texel, wrapped. Never out of bounds.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> [u8; 3] {
        let (tx, ty) = self.texel_coords(u, v);
        let idx = (ty * self.width + tx) * 4;
        [self.rgba[idx], self.rgba[idx + 1], self.rgba[idx + 2]]
    }
}

#[inline]
fn wrap(coord: f32, size: usize) -> usize {
    let scaled = (coord * size as f32).floor();
    if !scaled.is_finite() {
        return 0;
    }
    (scaled as i64).rem_euclid(size as i64) as usize
}

/// Anything that can hand out its RGBA pixels.
pub trait TextureSource {
    fn read_pixels(&self) -> RenderResult<TextureView<'_>>;
}

/// Owned RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaTexture {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaTexture {
    /// Wrap raw RGBA bytes. The length is checked when the pixels are read.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_fn(width: usize, height: usize, mut texel: impl FnMut(usize, usize) -> [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                let [r, g, b] = texel(x, y);
                data.extend_from_slice(&[r, g, b, 0xFF]);
            }
        }
        Self::new(width, height, data)
    }

    /// `size` x `size` checkerboard with square cells of `cell` texels.
    pub fn checkerboard(size: usize, cell: usize, a: [u8; 3], b: [u8; 3]) -> Self {
        let cell = cell.max(1);
        Self::from_fn(size, size, |x, y| {
            if (x / cell + y / cell) % 2 == 0 {
                a
            } else {
                b
            }
        })
    }

    /// Perlin-noise blend between `base` and `dark`.
    pub fn noise(size: usize, seed: u32, base: [u8; 3], dark: [u8; 3]) -> Self {
        let perlin = Perlin::new(seed);
        let scale = 8.0 / size.max(1) as f64;
        Self::from_fn(size, size, |x, y| {
            let n = perlin.get([x as f64 * scale, y as f64 * scale]);
            let t = ((n + 1.0) * 0.5).clamp(0.0, 1.0) as f32;
            let mix = |b: u8, d: u8| (b as f32 + (d as f32 - b as f32) * t) as u8;
            [mix(base[0], dark[0]), mix(base[1], dark[1]), mix(base[2], dark[2])]
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

impl TextureSource for RgbaTexture {
    fn read_pixels(&self) -> RenderResult<TextureView<'_>> {
        TextureView::new(self.width, self.height, &self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> RgbaTexture {
        RgbaTexture::from_fn(4, 2, |x, y| [x as u8 * 10, y as u8 * 100, 7])
    }

    #[test]
    fn samples_nearest_texel() {
        let tex = gradient();
        let view = tex.read_pixels().unwrap();
        assert_eq!(view.sample(0.0, 0.0), [0, 0, 7]);
        assert_eq!(view.sample(0.5, 0.5), [20, 100, 7]);
        assert_eq!(view.sample(0.99, 0.99), [30, 100, 7]);
    }

    #[test]
    fn coordinates_wrap_in_both_directions() {
        let tex = gradient();
        let view = tex.read_pixels().unwrap();
        assert_eq!(view.texel_coords(1.0, 1.0), (0, 0));
        assert_eq!(view.texel_coords(1.25, 2.5), (1, 1));
        assert_eq!(view.texel_coords(-0.25, -0.5), (3, 1));
        assert_eq!(view.texel_coords(f32::NAN, f32::INFINITY), (0, 0));
    }

    #[test]
    fn malformed_buffers_are_unreadable() {
        let short = RgbaTexture::new(2, 2, vec![0; 15]);
        assert!(matches!(short.read_pixels(), Err(RenderError::TextureUnreadable(_))));

        let empty = RgbaTexture::new(0, 4, Vec::new());
        assert!(matches!(empty.read_pixels(), Err(RenderError::TextureUnreadable(_))));
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let tex = RgbaTexture::checkerboard(8, 2, [255, 255, 255], [0, 0, 0]);
        let view = tex.read_pixels().unwrap();
        assert_eq!(view.sample(0.0, 0.0), [255, 255, 255]);
        assert_eq!(view.sample(0.25, 0.0), [0, 0, 0]);
        assert_eq!(view.sample(0.25, 0.25), [255, 255, 255]);
    }

    #[test]
    fn noise_texture_is_deterministic() {
        let a = RgbaTexture::noise(16, 7, [30, 120, 30], [10, 60, 10]);
        let b = RgbaTexture::noise(16, 7, [30, 120, 30], [10, 60, 10]);
        assert_eq!(a, b);
        assert!(a.read_pixels().is_ok());
    }
}
