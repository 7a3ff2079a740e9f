//! Off-screen capture targets, one per eye.
//!
//! The pipeline owns a [`CaptureTargets`] pair exclusively. A resize builds a
//! complete new pair before touching the old one, then swaps and releases in
//! one step, so no frame can observe a half-replaced pair.

mod id;
mod pair;

pub use id::TargetId;
pub use pair::CaptureTargets;

use crate::coords::Resolution;
use crate::rig::Eye;

/// A backend buffer that an eye pass renders into and the compositor reads.
pub trait CaptureTarget {
    /// Unique per allocation; never reused within a process.
    fn id(&self) -> TargetId;

    fn eye(&self) -> Eye;

    fn resolution(&self) -> Resolution;
}
