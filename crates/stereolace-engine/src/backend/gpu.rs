//! wgpu backend.
//!
//! Capture targets are sRGB color textures with a matching depth buffer. The
//! backend borrows the window's [`Gpu`] and the persistent [`InterlacePass`]
//! for the duration of one frame loop callback:
//!
//! ```ignore
//! let mut backend = GpuBackend::new(ctx.gpu, &mut self.interlace, ctx.window.window);
//! pipeline.render(&mut backend, &mut scene)?;
//! ```

use anyhow::anyhow;
use winit::window::Window;

use crate::compositor::{self, CompositeParams, InterlacePass};
use crate::coords::Resolution;
use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::error::{StereoError, StereoResult};
use crate::rig::Eye;
use crate::targets::{CaptureTarget, TargetId};

use super::StereoBackend;

/// Color format of every capture target.
pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Depth format of every capture target.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// One eye's color + depth textures.
pub struct GpuTarget {
    id: TargetId,
    eye: Eye,
    resolution: Resolution,
    _color: wgpu::Texture,
    color_view: wgpu::TextureView,
    _depth: wgpu::Texture,
    depth_view: wgpu::TextureView,
}

impl GpuTarget {
    fn create(device: &wgpu::Device, eye: Eye, resolution: Resolution) -> Self {
        let size = wgpu::Extent3d {
            width: resolution.width,
            height: resolution.height,
            depth_or_array_layers: 1,
        };

        let label = match eye {
            Eye::Left => ("stereolace left color", "stereolace left depth"),
            Eye::Right => ("stereolace right color", "stereolace right depth"),
        };

        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label.0),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label.1),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        Self {
            id: TargetId::next(),
            eye,
            resolution,
            color_view: color.create_view(&wgpu::TextureViewDescriptor::default()),
            _color: color,
            depth_view: depth.create_view(&wgpu::TextureViewDescriptor::default()),
            _depth: depth,
        }
    }

    pub fn color_view(&self) -> &wgpu::TextureView {
        &self.color_view
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }
}

impl CaptureTarget for GpuTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn eye(&self) -> Eye {
        self.eye
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }
}

/// Drawing context for one eye, handed to the scene renderer.
///
/// Everything the scene records goes into the frame encoder, in front of the
/// interlace pass.
pub struct GpuEyePass<'p> {
    pub device: &'p wgpu::Device,
    pub queue: &'p wgpu::Queue,
    pub encoder: &'p mut wgpu::CommandEncoder,
    pub color_view: &'p wgpu::TextureView,
    pub depth_view: &'p wgpu::TextureView,
    pub color_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
    pub resolution: Resolution,
    pub eye: Eye,
    pub target_id: TargetId,
}

impl GpuEyePass<'_> {
    /// Begins a render pass on this eye's target, clearing color to `clear`
    /// and depth to 1.0.
    pub fn begin_render_pass(&mut self, clear: wgpu::Color) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(match self.eye {
                Eye::Left => "stereolace left eye pass",
                Eye::Right => "stereolace right eye pass",
            }),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// Per-callback view over the window GPU context.
pub struct GpuBackend<'a, 'w> {
    gpu: &'a mut Gpu<'w>,
    interlace: &'a mut InterlacePass,
    window: &'a Window,
}

impl<'a, 'w> GpuBackend<'a, 'w> {
    pub fn new(gpu: &'a mut Gpu<'w>, interlace: &'a mut InterlacePass, window: &'a Window) -> Self {
        Self {
            gpu,
            interlace,
            window,
        }
    }

    pub fn gpu(&self) -> &Gpu<'w> {
        self.gpu
    }
}

impl<'a, 'w> StereoBackend for GpuBackend<'a, 'w> {
    type Target = GpuTarget;
    type Frame = GpuFrame;
    type EyePass<'p>
        = GpuEyePass<'p>
    where
        Self: 'p;

    fn allocate_target(&mut self, eye: Eye, resolution: Resolution) -> StereoResult<GpuTarget> {
        if resolution.is_empty() {
            return Err(StereoError::ZeroResolution {
                width: resolution.width,
                height: resolution.height,
            });
        }
        let max = self.gpu.max_texture_dimension();
        if resolution.width > max || resolution.height > max {
            return Err(StereoError::TargetAllocation {
                eye,
                resolution,
                source: anyhow!("device limit is {max}px per side"),
            });
        }

        let target = GpuTarget::create(self.gpu.device(), eye, resolution);
        log::debug!("gpu: allocated {eye:?} target {:?} at {resolution}", target.id);
        Ok(target)
    }

    fn release_target(&mut self, target: GpuTarget) {
        log::trace!("gpu: releasing {:?} target {:?}", target.eye, target.id);
        drop(target);
    }

    fn resize_surface(&mut self, resolution: Resolution) {
        self.gpu.resize(resolution);
    }

    fn begin_frame(&mut self) -> StereoResult<Option<GpuFrame>> {
        match self.gpu.begin_frame() {
            Ok(frame) => Ok(Some(frame)),
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                log::warn!("surface error ({action:?}); frame skipped");
                match action {
                    SurfaceErrorAction::Fatal => Err(StereoError::SurfaceLost),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => Ok(None),
                }
            }
        }
    }

    fn eye_pass<'p>(&'p mut self, frame: &'p mut GpuFrame, target: &'p mut GpuTarget) -> GpuEyePass<'p> {
        GpuEyePass {
            device: self.gpu.device(),
            queue: self.gpu.queue(),
            encoder: &mut frame.encoder,
            color_view: &target.color_view,
            depth_view: &target.depth_view,
            color_format: TARGET_FORMAT,
            depth_format: DEPTH_FORMAT,
            resolution: target.resolution,
            eye: target.eye,
            target_id: target.id,
        }
    }

    fn composite(
        &mut self,
        frame: &mut GpuFrame,
        left: &GpuTarget,
        right: &GpuTarget,
        params: &CompositeParams,
    ) -> StereoResult<()> {
        compositor::validate_targets(params, left, right)?;
        if self.gpu.size() != params.resolution {
            return Err(StereoError::SurfaceMismatch {
                actual: self.gpu.size(),
                expected: params.resolution,
            });
        }

        self.interlace.encode(
            self.gpu.device(),
            self.gpu.queue(),
            &mut frame.encoder,
            &frame.view,
            self.gpu.surface_format(),
            left,
            right,
            params,
        );
        Ok(())
    }

    fn present(&mut self, frame: GpuFrame) {
        self.window.pre_present_notify();
        self.gpu.submit(frame);
    }
}
