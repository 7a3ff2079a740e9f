//! Seams between the stereo pipeline and whatever executes it.
//!
//! The pipeline only speaks [`StereoBackend`] and [`SceneRenderer`]:
//! - [`gpu`]: wgpu textures, an interlace render pass, surface presentation
//! - [`software`]: CPU pixel buffers; runs headless and backs the tests

pub mod gpu;
pub mod software;

use crate::compositor::CompositeParams;
use crate::coords::Resolution;
use crate::error::StereoResult;
use crate::rig::{Eye, EyeCamera};
use crate::targets::CaptureTarget;

/// Graphics backend driven by [`crate::pipeline::StereoPipeline`].
pub trait StereoBackend {
    /// Off-screen buffer for one eye.
    type Target: CaptureTarget;

    /// One acquired output frame, from `begin_frame` to `present`.
    type Frame;

    /// Drawing context bound to exactly one capture target. The binding ends
    /// when the pass is dropped.
    type EyePass<'p>
    where
        Self: 'p;

    fn allocate_target(&mut self, eye: Eye, resolution: Resolution) -> StereoResult<Self::Target>;

    /// Returns a target's resources. The default simply drops it.
    fn release_target(&mut self, target: Self::Target) {
        drop(target);
    }

    /// Resizes the presentation surface to `resolution` device pixels.
    fn resize_surface(&mut self, resolution: Resolution);

    /// Acquires the next output frame. `Ok(None)` means the frame should be
    /// skipped (transient surface condition).
    fn begin_frame(&mut self) -> StereoResult<Option<Self::Frame>>;

    fn eye_pass<'p>(
        &'p mut self,
        frame: &'p mut Self::Frame,
        target: &'p mut Self::Target,
    ) -> Self::EyePass<'p>;

    /// Writes the interlaced image into the frame's default output.
    fn composite(
        &mut self,
        frame: &mut Self::Frame,
        left: &Self::Target,
        right: &Self::Target,
        params: &CompositeParams,
    ) -> StereoResult<()>;

    fn present(&mut self, frame: Self::Frame);
}

/// Scene provider: draws the scene from `camera` into the bound eye target.
///
/// Errors are reported to the caller of `render` unchanged.
pub trait SceneRenderer<B: StereoBackend> {
    fn render_into(&mut self, pass: &mut B::EyePass<'_>, camera: &EyeCamera) -> anyhow::Result<()>;
}
