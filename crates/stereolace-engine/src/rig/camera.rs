use glam::{Mat4, Quat, Vec3};

use super::projection::Projection;

/// Which eye a camera, target or pass belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    /// Render order within a frame.
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    /// Side of the rig origin the eye sits on, along local +X.
    #[inline]
    pub const fn lateral_sign(self) -> f32 {
        match self {
            Eye::Left => -1.0,
            Eye::Right => 1.0,
        }
    }
}

/// Snapshot of one eye camera in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EyeCamera {
    pub eye: Eye,
    pub position: Vec3,
    pub rotation: Quat,
    pub projection: Projection,
}

impl EyeCamera {
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection.matrix() * self.view()
    }
}

/// Parent transform for the two eye cameras.
///
/// The projection is stored once and handed to both cameras, so the eyes can
/// only differ by their lateral offset.
#[derive(Debug, Clone)]
pub struct StereoRig {
    position: Vec3,
    rotation: Quat,
    initial_position: Vec3,
    interocular: f32,
    projection: Projection,
}

impl StereoRig {
    /// `interocular` is the full eye separation; each eye sits half of it
    /// from the rig origin. Negative or non-finite separations become zero.
    pub fn new(position: Vec3, interocular: f32, projection: Projection) -> Self {
        let interocular = if interocular.is_finite() { interocular.max(0.0) } else { 0.0 };
        Self {
            position,
            rotation: Quat::IDENTITY,
            initial_position: position,
            interocular,
            projection,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn interocular(&self) -> f32 {
        self.interocular
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Rotates the whole rig. Non-finite rotations are ignored.
    pub fn set_rotation(&mut self, rotation: Quat) {
        if !rotation.is_finite() || rotation.length_squared() == 0.0 {
            return;
        }
        self.rotation = rotation.normalize();
    }

    /// Moves along the rig's current local axes: +X right, +Y up, -Z forward.
    pub fn translate(&mut self, local: Vec3) {
        if !local.is_finite() {
            return;
        }
        self.position += self.rotation * local;
    }

    /// Returns the rig to where it was constructed. Rotation is untouched;
    /// orientation reset is driven separately.
    pub fn reset_position(&mut self) {
        self.position = self.initial_position;
    }

    pub fn set_projection(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        self.projection = Projection::new(fov_y, aspect, near, far);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection = self.projection.with_aspect(aspect);
    }

    /// Eye position relative to the rig origin, in rig space.
    #[inline]
    pub fn eye_offset(&self, eye: Eye) -> Vec3 {
        Vec3::X * (eye.lateral_sign() * self.interocular * 0.5)
    }

    pub fn camera(&self, eye: Eye) -> EyeCamera {
        EyeCamera {
            eye,
            position: self.position + self.rotation * self.eye_offset(eye),
            rotation: self.rotation,
            projection: self.projection,
        }
    }

    pub fn cameras(&self) -> [EyeCamera; 2] {
        Eye::BOTH.map(|eye| self.camera(eye))
    }
}
