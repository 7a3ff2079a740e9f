use std::f32::consts::FRAC_PI_2;

use super::composer::RotationComposer;

/// Pitch bound, inclusive on both sides.
pub const PITCH_LIMIT: f32 = FRAC_PI_2;

/// Pitch/yaw/roll triple in radians.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Angles {
    /// Rotation about the rig's right axis (X).
    pub pitch: f32,
    /// Rotation about the up axis (Y).
    pub yaw: f32,
    /// Rotation about the forward axis (Z).
    pub roll: f32,
}

impl Angles {
    #[inline]
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }
}

/// Accumulated orientation of the stereo rig.
///
/// Fields are private: the only ways to change the angles are
/// [`apply_delta`](Self::apply_delta) and [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct OrientationState {
    current: Angles,
    initial: Angles,
}

impl OrientationState {
    /// Records `initial` for [`reset`](Self::reset). Its pitch is clamped like
    /// any other update.
    pub fn new(initial: Angles) -> Self {
        let initial = Angles {
            pitch: initial.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            ..initial
        };
        Self {
            current: initial,
            initial,
        }
    }

    /// Accumulates a look delta.
    ///
    /// Yaw and pitch are subtracted (pointer motion to the right turns right,
    /// motion down looks down), roll is added. Non-finite components are
    /// dropped so a single bad event cannot poison the state.
    pub fn apply_delta(&mut self, delta_yaw: f32, delta_pitch: f32, delta_roll: f32) {
        if delta_yaw.is_finite() {
            self.current.yaw -= delta_yaw;
        }
        if delta_pitch.is_finite() {
            self.current.pitch -= delta_pitch;
        }
        if delta_roll.is_finite() {
            self.current.roll += delta_roll;
        }

        self.current.pitch = self.current.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Restores the angles recorded at construction.
    pub fn reset(&mut self) {
        self.current = self.initial;
    }

    pub fn angles(&self) -> Angles {
        self.current
    }

    pub fn initial(&self) -> Angles {
        self.initial
    }

    /// Derives the rig rotation through `composer`.
    pub fn compose_rotation(&self, composer: &dyn RotationComposer) -> glam::Quat {
        composer.compose(self.current)
    }
}

impl Default for OrientationState {
    fn default() -> Self {
        Self::new(Angles::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_and_pitch_subtract_roll_adds() {
        let mut o = OrientationState::default();
        o.apply_delta(0.1, 0.2, 0.3);
        let a = o.angles();
        assert_eq!(a.yaw, -0.1);
        assert_eq!(a.pitch, -0.2);
        assert_eq!(a.roll, 0.3);
    }

    #[test]
    fn pitch_clamps_at_both_poles() {
        let mut o = OrientationState::default();
        o.apply_delta(0.0, -10.0, 0.0);
        assert_eq!(o.angles().pitch, PITCH_LIMIT);
        o.apply_delta(0.0, 25.0, 0.0);
        assert_eq!(o.angles().pitch, -PITCH_LIMIT);
    }

    #[test]
    fn yaw_and_roll_are_unbounded() {
        let mut o = OrientationState::default();
        for _ in 0..100 {
            o.apply_delta(1.0, 0.0, 1.0);
        }
        assert_eq!(o.angles().yaw, -100.0);
        assert_eq!(o.angles().roll, 100.0);
    }

    #[test]
    fn non_finite_deltas_are_ignored() {
        let mut o = OrientationState::default();
        o.apply_delta(f32::NAN, f32::INFINITY, 0.5);
        assert_eq!(o.angles(), Angles::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn reset_restores_initial_bits() {
        let initial = Angles::new(0.123_456_7, -2.5, 0.333);
        let mut o = OrientationState::new(initial);
        o.apply_delta(0.7, -0.9, 1.1);
        o.apply_delta(-3.0, 4.0, 0.01);
        o.reset();
        let a = o.angles();
        assert_eq!(a.pitch.to_bits(), initial.pitch.to_bits());
        assert_eq!(a.yaw.to_bits(), initial.yaw.to_bits());
        assert_eq!(a.roll.to_bits(), initial.roll.to_bits());
    }

    #[test]
    fn initial_pitch_out_of_range_is_clamped() {
        let o = OrientationState::new(Angles::new(3.0, 0.0, 0.0));
        assert_eq!(o.initial().pitch, PITCH_LIMIT);
    }
}
