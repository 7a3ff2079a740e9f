use proptest::prelude::*;

use stereolace_engine::orientation::{Angles, OrientationState, RotationMode, PITCH_LIMIT};

fn delta() -> impl Strategy<Value = (f32, f32, f32)> {
    (-10.0f32..10.0, -10.0f32..10.0, -10.0f32..10.0)
}

proptest! {
    #[test]
    fn pitch_stays_within_limit(deltas in prop::collection::vec(delta(), 0..64)) {
        let mut state = OrientationState::default();
        for (yaw, pitch, roll) in deltas {
            state.apply_delta(yaw, pitch, roll);
            let p = state.angles().pitch;
            prop_assert!((-PITCH_LIMIT..=PITCH_LIMIT).contains(&p));
        }
    }

    #[test]
    fn reset_is_bit_exact(
        initial in (-1.5f32..1.5, -6.0f32..6.0, -6.0f32..6.0),
        deltas in prop::collection::vec(delta(), 1..32),
    ) {
        let mut state = OrientationState::new(Angles::new(initial.0, initial.1, initial.2));
        for (yaw, pitch, roll) in deltas {
            state.apply_delta(yaw, pitch, roll);
        }
        state.reset();
        let (a, b) = (state.angles(), state.initial());
        prop_assert_eq!(a.pitch.to_bits(), b.pitch.to_bits());
        prop_assert_eq!(a.yaw.to_bits(), b.yaw.to_bits());
        prop_assert_eq!(a.roll.to_bits(), b.roll.to_bits());
    }

    #[test]
    fn composed_rotation_is_unit(deltas in prop::collection::vec(delta(), 0..32)) {
        let mut state = OrientationState::default();
        for (yaw, pitch, roll) in deltas {
            state.apply_delta(yaw, pitch, roll);
        }
        for composer in [RotationMode::Quaternion.composer(), RotationMode::Euler.composer()] {
            let q = state.compose_rotation(composer.as_ref());
            prop_assert!((q.length() - 1.0).abs() < 1e-4);
        }
    }
}
