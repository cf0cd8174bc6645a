/// Framebuffer for software rendering
/// Stores packed ARGB color only; depth ordering is done by the painter's
/// sort in the polygon path, so there is no depth buffer.
use super::surface::{blend_argb, DrawSurface};
use glam::Vec2;

pub struct Framebuffer {
    // Hot data: used for every bounds check and index calculation
    pub width: usize,
    pub height: usize,
    pub color_buffer: Vec<u32>, // ARGB format
    // Scratch list of (x, winding) edge crossings reused across scan lines
    crossings: Vec<(f32, i32)>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color_buffer: vec![0; width * height],
            crossings: Vec::new(),
        }
    }

    /// Clear the color buffer
    pub fn clear(&mut self, clear_color: u32) {
        self.color_buffer.fill(clear_color);
    }

    /// Resize framebuffer
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.color_buffer.resize(width * height, 0);
    }

    /// Read one pixel, `None` outside the buffer.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.color_buffer[y * self.width + x])
    }

    /// Set pixel without blending
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            let index = y * self.width + x;
            self.color_buffer[index] = color;
        }
    }

    /// Blend a pixel using the alpha byte of `color`
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            let index = y * self.width + x;
            self.color_buffer[index] = blend_argb(self.color_buffer[index], color);
        }
    }

    /// Get color buffer as slice
    pub fn color_buffer_slice(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Scan-line polygon fill with the non-zero winding rule.
    ///
    /// A pixel is covered when its center `(x + 0.5, y + 0.5)` lies inside the
    /// polygon. Edges are half-open in y so shared vertices count once.
    /// Polygons with non-finite points are ignored.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: u32) {
        if points.len() < 3 || self.width == 0 || self.height == 0 {
            return;
        }
        if !points.iter().all(|p| p.is_finite()) {
            return;
        }

        let (min_y, max_y) = points
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            });

        // Rows whose centers lie in [min_y, max_y), clamped to the buffer
        let first_row = (min_y - 0.5).ceil().max(0.0);
        let last_row = ((max_y - 0.5).ceil() - 1.0).min(self.height as f32 - 1.0);
        if first_row > last_row {
            return;
        }

        let max_x = self.width as f32 - 1.0;
        let mut crossings = std::mem::take(&mut self.crossings);

        for row in first_row as usize..=last_row as usize {
            let sample_y = row as f32 + 0.5;
            crossings.clear();

            let mut prev = points[points.len() - 1];
            for &cur in points {
                let (a, b) = (prev, cur);
                prev = cur;

                let (lo, hi, winding) = if a.y < b.y {
                    (a, b, 1)
                } else if a.y > b.y {
                    (b, a, -1)
                } else {
                    continue; // horizontal edges never cross a sample row
                };
                if sample_y < lo.y || sample_y >= hi.y {
                    continue;
                }
                let t = (sample_y - lo.y) / (hi.y - lo.y);
                crossings.push((lo.x + t * (hi.x - lo.x), winding));
            }

            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let row_base = row * self.width;
            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding == 0 {
                    continue;
                }
                let span_start = (pair[0].0 - 0.5).ceil().max(0.0);
                let span_end = ((pair[1].0 - 0.5).ceil() - 1.0).min(max_x);
                if span_start > span_end {
                    continue;
                }
                self.color_buffer[row_base + span_start as usize..=row_base + span_end as usize]
                    .fill(color);
            }
        }

        self.crossings = crossings;
    }

    /// Draw the closed outline through `points`
    pub fn stroke_polygon(&mut self, points: &[Vec2], color: u32) {
        if points.len() < 2 || !points.iter().all(|p| p.is_finite()) {
            return;
        }
        let mut prev = points[points.len() - 1];
        for &cur in points {
            self.draw_line(prev, cur, color);
            prev = cur;
        }
    }

    /// DDA line, clipped to the buffer first so far-off endpoints stay cheap.
    /// Blends by the alpha byte of `color`.
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, color: u32) {
        let Some((a, b)) = clip_segment(from, to, self.width as f32, self.height as f32) else {
            return;
        };

        let delta = b - a;
        let steps = delta.abs().max_element().ceil().max(1.0) as usize;
        let step = delta / steps as f32;

        let mut p = a;
        for _ in 0..=steps {
            let (x, y) = (p.x.floor(), p.y.floor());
            if x >= 0.0 && y >= 0.0 {
                self.blend_pixel(x as usize, y as usize, color);
            }
            p += step;
        }
    }
}

impl DrawSurface for Framebuffer {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: u32) {
        Framebuffer::fill_polygon(self, points, color);
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: u32) {
        Framebuffer::stroke_polygon(self, points, color);
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        Framebuffer::set_pixel(self, x, y, color);
    }
}

/// Liang-Barsky clip of segment `a -> b` to `[0, width] x [0, height]`.
fn clip_segment(a: Vec2, b: Vec2, width: f32, height: f32) -> Option<(Vec2, Vec2)> {
    if !(a.is_finite() && b.is_finite()) {
        return None;
    }

    let d = b - a;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [(-d.x, a.x), (d.x, width - a.x), (-d.y, a.y), (d.y, height - a.y)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((a + d * t0, a + d * t1))
}
