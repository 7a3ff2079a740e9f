use glam::Vec3;

use crate::compositor::InterlaceMode;
use crate::orientation::{Angles, RotationMode};
use crate::rig::Projection;

/// Static configuration consumed when a pipeline is built.
///
/// Movement fields are not used by the pipeline itself; input layers read
/// them through [`crate::pipeline::StereoPipeline::config`] to scale the
/// commands they queue.
#[derive(Debug, Clone)]
pub struct StereoConfig {
    /// Full distance between the two eye cameras, world units.
    pub interocular_distance: f32,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,

    /// World units per second.
    pub move_speed: f32,
    /// Speed factor while boost is held.
    pub boost_multiplier: f32,
    /// Radians per second for key-driven yaw and roll.
    pub turn_speed: f32,
    /// Radians per pointer pixel.
    pub mouse_sensitivity: f32,

    pub initial_position: Vec3,
    pub initial_angles: Angles,

    pub rotation_mode: RotationMode,
    pub interlace_mode: InterlaceMode,
}

impl Default for StereoConfig {
    fn default() -> Self {
        Self {
            interocular_distance: 0.06,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            move_speed: 3.0,
            boost_multiplier: 6.0,
            turn_speed: 1.2,
            mouse_sensitivity: 0.002,
            initial_position: Vec3::new(0.0, 10.0, 30.0),
            initial_angles: Angles::default(),
            rotation_mode: RotationMode::Quaternion,
            interlace_mode: InterlaceMode::Horizontal,
        }
    }
}

impl StereoConfig {
    pub fn projection(&self, aspect: f32) -> Projection {
        Projection::new(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }
}
