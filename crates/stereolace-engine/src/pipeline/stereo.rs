use glam::Vec3;
use log::{debug, info, trace, warn};

use crate::backend::{SceneRenderer, StereoBackend};
use crate::command::{CommandQueue, StereoCommand};
use crate::compositor::{CompositeParams, InterlaceCompositor, InterlaceMode};
use crate::coords::{DeviceSize, Resolution};
use crate::error::{StereoError, StereoResult};
use crate::orientation::{OrientationState, RotationComposer};
use crate::rig::{Eye, StereoRig};
use crate::targets::{CaptureTarget, CaptureTargets};

use super::StereoConfig;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PipelineState {
    /// No capture targets yet; the first resize allocates them.
    Uninitialized,
    Ready,
    Rendering,
    Resizing,
}

/// Result of one [`StereoPipeline::render`] call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Presented,
    /// The surface had no frame to give; nothing was drawn.
    Skipped,
}

/// Owns the stereo rig, both capture targets and the compositor state.
///
/// The backend is borrowed per call, so one pipeline can be driven from a
/// frame loop that only holds its graphics context for the length of a
/// callback.
pub struct StereoPipeline<T> {
    config: StereoConfig,
    state: PipelineState,
    orientation: OrientationState,
    composer: Box<dyn RotationComposer>,
    rig: StereoRig,
    targets: Option<CaptureTargets<T>>,
    compositor: InterlaceCompositor,
    device_size: Option<DeviceSize>,
    frames_presented: u64,
}

impl<T: CaptureTarget> StereoPipeline<T> {
    /// Builds a pipeline and allocates targets for `device_size`.
    pub fn new<B>(backend: &mut B, config: &StereoConfig, device_size: DeviceSize) -> StereoResult<Self>
    where
        B: StereoBackend<Target = T>,
    {
        let resolution = device_size.resolution();
        ensure_renderable(resolution)?;

        let mut pipeline = Self::uninitialized(config);
        pipeline.handle_resize(backend, device_size)?;
        info!(
            "stereo pipeline ready: {resolution}, {:?} interlace, {} rotation",
            pipeline.compositor.mode(),
            pipeline.composer.name(),
        );
        Ok(pipeline)
    }

    /// Builds a pipeline without targets. Call [`handle_resize`](Self::handle_resize)
    /// once the drawable size is known.
    pub fn uninitialized(config: &StereoConfig) -> Self {
        let orientation = OrientationState::new(config.initial_angles);
        let composer = config.rotation_mode.composer();
        let mut rig = StereoRig::new(
            config.initial_position,
            config.interocular_distance,
            config.projection(1.0),
        );
        rig.set_rotation(orientation.compose_rotation(composer.as_ref()));

        Self {
            config: config.clone(),
            state: PipelineState::Uninitialized,
            orientation,
            composer,
            rig,
            targets: None,
            compositor: InterlaceCompositor::new(Resolution::default(), config.interlace_mode),
            device_size: None,
            frames_presented: 0,
        }
    }

    /// Renders both eyes and presents the interlaced frame.
    ///
    /// A scene error drops the frame and comes back as [`StereoError::Scene`];
    /// the pipeline stays usable.
    pub fn render<B, S>(&mut self, backend: &mut B, scene: &mut S) -> StereoResult<FrameOutcome>
    where
        B: StereoBackend<Target = T>,
        S: SceneRenderer<B> + ?Sized,
    {
        let Some(targets) = self.targets.as_mut() else {
            return Err(StereoError::Uninitialized);
        };

        self.state = PipelineState::Rendering;
        let params = self.compositor.params();
        let result = render_frame(backend, scene, &self.rig, targets, &params);
        self.state = PipelineState::Ready;

        match &result {
            Ok(FrameOutcome::Presented) => {
                self.frames_presented += 1;
                trace!("frame {} presented at {}", self.frames_presented, params.resolution);
            }
            Ok(FrameOutcome::Skipped) => warn!("frame skipped: surface not ready"),
            Err(StereoError::Scene(err)) => warn!("scene failed, frame dropped: {err:#}"),
            Err(err) => warn!("frame dropped: {err}"),
        }
        result
    }

    /// Moves the pipeline to a new drawable size.
    ///
    /// Both new targets are allocated before anything else changes, so a
    /// failed allocation leaves the rig, surface, targets and compositor as
    /// they were.
    pub fn handle_resize<B>(&mut self, backend: &mut B, device_size: DeviceSize) -> StereoResult<()>
    where
        B: StereoBackend<Target = T>,
    {
        let resolution = device_size.resolution();
        ensure_renderable(resolution)?;

        let previous = self.state;
        self.state = PipelineState::Resizing;

        let fresh = match CaptureTargets::allocate(backend, resolution) {
            Ok(fresh) => fresh,
            Err(err) => {
                self.state = previous;
                warn!("resize to {resolution} failed: {err}");
                return Err(err);
            }
        };

        self.rig.set_aspect(resolution.aspect());
        backend.resize_surface(resolution);
        match self.targets.as_mut() {
            Some(targets) => targets.replace(fresh).release(backend),
            None => self.targets = Some(fresh),
        }
        self.compositor.set_resolution(resolution);
        self.device_size = Some(device_size);

        self.state = PipelineState::Ready;
        debug!(
            "stereo targets at {resolution} (scale factor {:.2})",
            device_size.scale_factor
        );
        Ok(())
    }

    /// Applies every queued command in order. Resizes coalesce to the last
    /// one and run after the rest.
    pub fn apply_commands<B>(&mut self, backend: &mut B, queue: &mut CommandQueue) -> StereoResult<()>
    where
        B: StereoBackend<Target = T>,
    {
        let mut resize = None;
        for command in queue.drain() {
            match command {
                StereoCommand::Rotate {
                    delta_yaw,
                    delta_pitch,
                    delta_roll,
                } => self.rotate_by(delta_yaw, delta_pitch, delta_roll),
                StereoCommand::Move(delta) => self.move_by(delta),
                StereoCommand::Reset => self.reset_camera(),
                StereoCommand::ToggleInterlace => {
                    self.toggle_interlace();
                }
                StereoCommand::SetInterlace(mode) => self.set_interlace(mode),
                StereoCommand::Resize(size) => resize = Some(size),
            }
        }

        match resize {
            Some(size) => self.handle_resize(backend, size),
            None => Ok(()),
        }
    }

    pub fn rotate_by(&mut self, delta_yaw: f32, delta_pitch: f32, delta_roll: f32) {
        self.orientation.apply_delta(delta_yaw, delta_pitch, delta_roll);
        self.sync_rotation();
    }

    /// Moves the rig along its local axes.
    pub fn move_by(&mut self, local: Vec3) {
        self.rig.translate(local);
    }

    /// Back to the initial angles and position.
    pub fn reset_camera(&mut self) {
        self.orientation.reset();
        self.rig.reset_position();
        self.sync_rotation();
        debug!("camera reset to {:?}", self.rig.position());
    }

    pub fn toggle_interlace(&mut self) -> InterlaceMode {
        let mode = self.compositor.toggle();
        debug!("interlace mode: {mode:?}");
        mode
    }

    pub fn set_interlace(&mut self, mode: InterlaceMode) {
        if mode != self.compositor.mode() {
            debug!("interlace mode: {mode:?}");
        }
        self.compositor.set_mode(mode);
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn config(&self) -> &StereoConfig {
        &self.config
    }

    pub fn rig(&self) -> &StereoRig {
        &self.rig
    }

    pub fn orientation(&self) -> &OrientationState {
        &self.orientation
    }

    pub fn composer(&self) -> &dyn RotationComposer {
        self.composer.as_ref()
    }

    pub fn composite_params(&self) -> CompositeParams {
        self.compositor.params()
    }

    pub fn interlace_mode(&self) -> InterlaceMode {
        self.compositor.mode()
    }

    pub fn targets(&self) -> Option<&CaptureTargets<T>> {
        self.targets.as_ref()
    }

    pub fn device_size(&self) -> Option<DeviceSize> {
        self.device_size
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Hands the capture targets back to the backend and returns to
    /// [`PipelineState::Uninitialized`].
    pub fn release_targets<B>(&mut self, backend: &mut B)
    where
        B: StereoBackend<Target = T>,
    {
        if let Some(targets) = self.targets.take() {
            targets.release(backend);
        }
        self.state = PipelineState::Uninitialized;
    }

    fn sync_rotation(&mut self) {
        let rotation = self.orientation.compose_rotation(self.composer.as_ref());
        self.rig.set_rotation(rotation);
    }
}

fn ensure_renderable(resolution: Resolution) -> StereoResult<()> {
    if resolution.is_empty() {
        return Err(StereoError::ZeroResolution {
            width: resolution.width,
            height: resolution.height,
        });
    }
    Ok(())
}

fn render_frame<B, S>(
    backend: &mut B,
    scene: &mut S,
    rig: &StereoRig,
    targets: &mut CaptureTargets<B::Target>,
    params: &CompositeParams,
) -> StereoResult<FrameOutcome>
where
    B: StereoBackend,
    B::Target: CaptureTarget,
    S: SceneRenderer<B> + ?Sized,
{
    let Some(mut frame) = backend.begin_frame()? else {
        return Ok(FrameOutcome::Skipped);
    };

    for eye in Eye::BOTH {
        let camera = rig.camera(eye);
        // The pass is bound to this eye's target until it drops.
        let mut pass = backend.eye_pass(&mut frame, targets.get_mut(eye));
        scene
            .render_into(&mut pass, &camera)
            .map_err(StereoError::Scene)?;
    }

    backend.composite(&mut frame, targets.left(), targets.right(), params)?;
    backend.present(frame);
    Ok(FrameOutcome::Presented)
}
