use thiserror::Error;

use crate::coords::Resolution;
use crate::rig::Eye;
use crate::targets::TargetId;

/// Failures surfaced by the stereo pipeline.
///
/// Precondition violations abort the operation that detected them; nothing is
/// allocated or drawn. Scene errors pass through untouched.
#[derive(Debug, Error)]
pub enum StereoError {
    /// `render` was called before the first successful resize.
    #[error("pipeline has no capture targets yet")]
    Uninitialized,

    /// The device reported a zero-sized drawable.
    #[error("device resolution {width}x{height} is not renderable")]
    ZeroResolution { width: u32, height: u32 },

    /// A capture target does not match the compositor's output resolution.
    #[error("{eye:?} target {id:?} is {actual}, compositor expects {expected}")]
    TargetMismatch {
        eye: Eye,
        id: TargetId,
        actual: Resolution,
        expected: Resolution,
    },

    /// The output surface is not at the compositor's output resolution.
    #[error("output surface is {actual}, compositor expects {expected}")]
    SurfaceMismatch {
        actual: Resolution,
        expected: Resolution,
    },

    /// The backend could not allocate a capture target.
    #[error("failed to allocate {eye:?} capture target at {resolution}")]
    TargetAllocation {
        eye: Eye,
        resolution: Resolution,
        #[source]
        source: anyhow::Error,
    },

    /// The output surface could not provide a frame.
    #[error("output surface is unavailable")]
    SurfaceLost,

    /// The scene provider failed while drawing into an eye target.
    #[error(transparent)]
    Scene(anyhow::Error),
}

pub type StereoResult<T> = Result<T, StereoError>;
