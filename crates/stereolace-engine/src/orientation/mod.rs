//! Rig orientation: accumulated pitch/yaw/roll and the rotation derived from it.
//!
//! Angles are radians. Pitch is kept inside `[-π/2, π/2]` after every update so
//! the view never flips over the pole.

mod composer;
mod state;

pub use composer::{EulerComposer, QuaternionComposer, RotationComposer, RotationMode};
pub use state::{Angles, OrientationState, PITCH_LIMIT};
