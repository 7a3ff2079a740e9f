use glam::Mat4;

const MIN_ASPECT: f32 = 1e-3;
const MIN_NEAR: f32 = 1e-4;
const MIN_FOV: f32 = 1e-3;
const MAX_FOV: f32 = std::f32::consts::PI - 1e-3;

/// Perspective projection shared by both eyes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    /// Vertical field of view, radians.
    pub fov_y: f32,
    /// Width over height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    /// Builds a projection with inputs clamped to a usable frustum.
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut p = Self {
            fov_y,
            aspect,
            near,
            far,
        };
        p.sanitize();
        p
    }

    /// Same projection with a different aspect ratio.
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self.sanitize();
        self
    }

    /// Right-handed perspective with a `[0, 1]` depth range.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    fn sanitize(&mut self) {
        self.fov_y = if self.fov_y.is_finite() {
            self.fov_y.clamp(MIN_FOV, MAX_FOV)
        } else {
            75f32.to_radians()
        };
        if !(self.aspect.is_finite() && self.aspect >= MIN_ASPECT) {
            self.aspect = 1.0;
        }
        if !(self.near.is_finite() && self.near >= MIN_NEAR) {
            self.near = MIN_NEAR;
        }
        if !(self.far.is_finite() && self.far > self.near) {
            self.far = self.near * 1000.0;
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(75f32.to_radians(), 1.0, 0.1, 1000.0)
    }
}
