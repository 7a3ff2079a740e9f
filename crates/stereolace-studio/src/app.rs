use stereolace_engine::backend::gpu::{GpuBackend, GpuTarget};
use stereolace_engine::command::CommandQueue;
use stereolace_engine::compositor::InterlacePass;
use stereolace_engine::coords::DeviceSize;
use stereolace_engine::core::{App, AppControl, FrameCtx};
use stereolace_engine::pipeline::{PipelineState, StereoConfig, StereoPipeline};
use stereolace_engine::StereoError;

use crate::controls::{ControlRequest, FlyControls};
use crate::scene::CubeField;

/// Studio application: fly camera over the cube field, output interlaced.
pub struct StudioApp {
    pipeline: StereoPipeline<GpuTarget>,
    interlace: InterlacePass,
    scene: CubeField,
    commands: CommandQueue,
    controls: FlyControls,
}

impl StudioApp {
    pub fn new(config: StereoConfig) -> Self {
        Self {
            pipeline: StereoPipeline::uninitialized(&config),
            interlace: InterlacePass::new(),
            scene: CubeField::new(),
            commands: CommandQueue::new(),
            controls: FlyControls::new(),
        }
    }
}

impl App for StudioApp {
    fn on_resize(&mut self, size: DeviceSize) {
        self.commands.resize(size);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let request = self.controls.update(
            ctx.input,
            ctx.input_frame,
            ctx.time.dt,
            self.pipeline.config(),
            &mut self.commands,
        );
        match request {
            Some(ControlRequest::GrabCursor) => ctx.runtime.grab_cursor(),
            Some(ControlRequest::ReleaseCursor) => ctx.runtime.release_cursor(),
            Some(ControlRequest::Exit) => return AppControl::Exit,
            None => {}
        }

        let mut backend = GpuBackend::new(ctx.gpu, &mut self.interlace, ctx.window.window);

        match self.pipeline.apply_commands(&mut backend, &mut self.commands) {
            Ok(()) => {}
            // Minimised windows report a zero size; keep the current targets.
            Err(StereoError::ZeroResolution { .. }) => {}
            Err(err) => log::error!("failed to apply input: {err}"),
        }
        if self.pipeline.state() == PipelineState::Uninitialized {
            return AppControl::Continue;
        }

        match self.pipeline.render(&mut backend, &mut self.scene) {
            Err(StereoError::SurfaceLost) => {
                log::error!("output surface lost; exiting");
                AppControl::Exit
            }
            // Dropped frames are logged by the pipeline.
            Ok(_) | Err(_) => AppControl::Continue,
        }
    }
}
