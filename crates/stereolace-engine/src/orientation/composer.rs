use glam::{EulerRot, Mat3, Quat, Vec3};

use super::state::Angles;

/// Turns accumulated angles into a rig rotation.
pub trait RotationComposer: Send + Sync {
    fn compose(&self, angles: Angles) -> Quat;

    /// Short name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Chains three axis rotations: yaw about +Y, then pitch about +X, then roll
/// about +Z (`yaw * pitch * roll`).
///
/// This is the default path. Each factor is a unit quaternion, so the product
/// stays well conditioned at every pitch.
#[derive(Debug, Copy, Clone, Default)]
pub struct QuaternionComposer;

impl RotationComposer for QuaternionComposer {
    fn compose(&self, angles: Angles) -> Quat {
        let yaw = Quat::from_axis_angle(Vec3::Y, angles.yaw);
        let pitch = Quat::from_axis_angle(Vec3::X, angles.pitch);
        let roll = Quat::from_axis_angle(Vec3::Z, angles.roll);
        (yaw * pitch * roll).normalize()
    }

    fn name(&self) -> &'static str {
        "quaternion"
    }
}

/// Legacy path: a fixed `YXZ` Euler triple applied through a rotation matrix.
///
/// Kept for compatibility with scenes tuned against it. Near the pitch limits
/// yaw and roll act about the same axis (gimbal lock) and the matrix to
/// quaternion conversion loses precision, so prefer [`QuaternionComposer`].
#[derive(Debug, Copy, Clone, Default)]
pub struct EulerComposer;

impl RotationComposer for EulerComposer {
    fn compose(&self, angles: Angles) -> Quat {
        let m = Mat3::from_euler(EulerRot::YXZ, angles.yaw, angles.pitch, angles.roll);
        Quat::from_mat3(&m).normalize()
    }

    fn name(&self) -> &'static str {
        "euler-yxz"
    }
}

/// Composer selection, fixed for the lifetime of a pipeline.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum RotationMode {
    #[default]
    Quaternion,
    Euler,
}

impl RotationMode {
    pub fn composer(self) -> Box<dyn RotationComposer> {
        match self {
            RotationMode::Quaternion => Box::new(QuaternionComposer),
            RotationMode::Euler => Box::new(EulerComposer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn close(a: Quat, b: Quat) -> bool {
        // q and -q are the same rotation.
        a.abs_diff_eq(b, 1e-5) || a.abs_diff_eq(-b, 1e-5)
    }

    #[test]
    fn zero_angles_compose_to_identity() {
        assert_eq!(QuaternionComposer.compose(Angles::default()), Quat::IDENTITY);
        assert!(close(EulerComposer.compose(Angles::default()), Quat::IDENTITY));
    }

    #[test]
    fn yaw_turns_forward_towards_minus_x() {
        let q = QuaternionComposer.compose(Angles::new(0.0, FRAC_PI_2, 0.0));
        let forward = q * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::NEG_X, 1e-5));
    }

    #[test]
    fn pitch_is_applied_in_the_yawed_frame() {
        // Yaw 90° then pitch up 45°: forward leans up while pointing along -X.
        let q = QuaternionComposer.compose(Angles::new(FRAC_PI_4, FRAC_PI_2, 0.0));
        let forward = q * Vec3::NEG_Z;
        assert!(forward.y > 0.7);
        assert!(forward.x < -0.7);
        assert!(forward.z.abs() < 1e-5);
    }

    #[test]
    fn roll_keeps_forward_axis() {
        let q = QuaternionComposer.compose(Angles::new(0.0, 0.0, 1.0));
        assert!((q * Vec3::NEG_Z).abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(!(q * Vec3::Y).abs_diff_eq(Vec3::Y, 1e-3));
    }

    #[test]
    fn both_paths_agree_away_from_the_poles() {
        let angles = Angles::new(0.4, -1.3, 0.25);
        assert!(close(
            QuaternionComposer.compose(angles),
            EulerComposer.compose(angles)
        ));
    }

    #[test]
    fn composition_stays_unit_at_pitch_limit() {
        let q = QuaternionComposer.compose(Angles::new(FRAC_PI_2, 2.0, -0.7));
        assert!((q.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn mode_selects_composer() {
        assert_eq!(RotationMode::default().composer().name(), "quaternion");
        assert_eq!(RotationMode::Euler.composer().name(), "euler-yxz");
    }
}
