/// View transform: Euler rotation, perspective projection and the
/// mouse-drag controller that feeds the view angles.
use glam::{Vec2, Vec3};

/// Default focal length of the perspective divide, in pixels.
pub const DEFAULT_FOCAL_LENGTH: f32 = 300.0;

/// Smallest magnitude allowed for `F + z` before it is clamped.
pub const PROJECTION_EPSILON: f32 = 1e-4;

/// Rotate a point by yaw (about the vertical axis) and then pitch (about
/// the horizontal axis). Pitch acts on the yaw-rotated z.
#[inline]
pub fn rotate(point: Vec3, pitch: f32, yaw: f32) -> Vec3 {
    let (sin_y, cos_y) = yaw.sin_cos();
    let (sin_x, cos_x) = pitch.sin_cos();

    let x = point.x * cos_y - point.z * sin_y;
    let z = point.x * sin_y + point.z * cos_y;

    let y = point.y * cos_x - z * sin_x;
    let z = point.y * sin_x + z * cos_x;

    Vec3::new(x, y, z)
}

/// Orientation of the view, in radians. Unbounded; wraps through sin/cos.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ViewAngles {
    /// Rotation around X
    pub pitch: f32,
    /// Rotation around Y
    pub yaw: f32,
}

impl ViewAngles {
    pub const fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }

    #[inline]
    pub fn rotate(&self, point: Vec3) -> Vec3 {
        rotate(point, self.pitch, self.yaw)
    }

    pub fn advance(&mut self, d_pitch: f32, d_yaw: f32) {
        self.pitch += d_pitch;
        self.yaw += d_yaw;
    }
}

/// Fixed-focal-length perspective projection onto a `width` x `height` surface.
///
/// The projection pole sits at view-space `z = -focal_length`; geometry must
/// stay in front of it. At the pole the denominator is clamped to
/// `±PROJECTION_EPSILON`, so `project` is always finite for finite input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projector {
    pub focal_length: f32,
    pub width: f32,
    pub height: f32,
}

impl Projector {
    pub fn new(focal_length: f32, width: usize, height: usize) -> Self {
        Self {
            focal_length,
            width: width as f32,
            height: height as f32,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Project a view-space point. Screen y grows downward.
    #[inline]
    pub fn project(&self, point: Vec3) -> Vec2 {
        let mut denom = self.focal_length + point.z;
        if denom.abs() < PROJECTION_EPSILON {
            denom = PROJECTION_EPSILON.copysign(denom);
        }
        let scale = self.focal_length / denom;
        Vec2::new(
            self.width * 0.5 + point.x * scale,
            self.height * 0.5 - point.y * scale,
        )
    }

    /// Like `project`, but returns `None` at the projection pole or when the
    /// result is not finite. Draw paths skip faces touching such a vertex.
    #[inline]
    pub fn try_project(&self, point: Vec3) -> Option<Vec2> {
        if (self.focal_length + point.z).abs() < PROJECTION_EPSILON {
            return None;
        }
        let projected = self.project(point);
        projected.is_finite().then_some(projected)
    }
}

/// Turns mouse drags into view-angle changes. Horizontal motion drives yaw,
/// vertical motion drives pitch, only while a button is held.
#[derive(Copy, Clone, Debug)]
pub struct OrbitController {
    pub sensitivity: f32,
    dragging: bool,
    last_cursor: Option<Vec2>,
}

impl OrbitController {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            dragging: false,
            last_cursor: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn press(&mut self) {
        self.dragging = true;
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Feed an absolute cursor position. Returns true if the angles changed.
    pub fn cursor_moved(&mut self, position: Vec2, angles: &mut ViewAngles) -> bool {
        let delta = self.last_cursor.map(|last| position - last);
        self.last_cursor = Some(position);
        match delta {
            Some(delta) => self.drag(delta, angles),
            None => false,
        }
    }

    /// Apply a relative mouse motion.
    pub fn drag(&self, delta: Vec2, angles: &mut ViewAngles) -> bool {
        if !self.dragging || delta == Vec2::ZERO {
            return false;
        }
        angles.advance(delta.y * self.sensitivity, delta.x * self.sensitivity);
        true
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(0.01)
    }
}
