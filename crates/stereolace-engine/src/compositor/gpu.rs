use bytemuck::{Pod, Zeroable};

use crate::backend::gpu::GpuTarget;
use crate::targets::{CaptureTarget, TargetId};

use super::state::CompositeParams;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct InterlaceUniform {
    resolution: [f32; 2],
    mode: u32,
    _pad: u32,
}

/// wgpu implementation of the interlace pass.
///
/// Pipeline objects are created lazily for the output format and rebuilt if
/// it changes. The bind group is cached per target pair; new targets after a
/// resize carry new ids, so a stale bind group is never reused.
#[derive(Default)]
pub struct InterlacePass {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    uniform: Option<wgpu::Buffer>,
    bind_group: Option<(TargetId, TargetId, wgpu::BindGroup)>,
}

impl InterlacePass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the interlace pass into `encoder`, writing every pixel of
    /// `output`. Targets must already be validated against `params`.
    #[allow(clippy::too_many_arguments)]
    pub fn encode(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output: &wgpu::TextureView,
        output_format: wgpu::TextureFormat,
        left: &GpuTarget,
        right: &GpuTarget,
        params: &CompositeParams,
    ) {
        self.ensure_pipeline(device, output_format);
        self.ensure_uniform(device);
        self.ensure_bind_group(device, left, right);

        self.write_uniform(queue, params);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some((_, _, bind_group)) = self.bind_group.as_ref() else { return };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("stereolace interlace pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(
            0.0,
            0.0,
            params.resolution.width as f32,
            params.resolution.height as f32,
            0.0,
            1.0,
        );
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    fn ensure_pipeline(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) {
        if self.pipeline_format == Some(format) && self.pipeline.is_some() {
            return;
        }

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("stereolace interlace shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/interlace.wgsl").into()),
        });

        let eye_texture = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("stereolace interlace bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<InterlaceUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                eye_texture(1),
                eye_texture(2),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("stereolace interlace pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("stereolace interlace pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("interlace pipeline created for {format:?}");

        self.pipeline_format = Some(format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
    }

    fn ensure_uniform(&mut self, device: &wgpu::Device) {
        if self.uniform.is_some() {
            return;
        }
        self.uniform = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("stereolace interlace ubo"),
            size: std::mem::size_of::<InterlaceUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.bind_group = None;
    }

    fn ensure_bind_group(&mut self, device: &wgpu::Device, left: &GpuTarget, right: &GpuTarget) {
        if let Some((l, r, _)) = &self.bind_group {
            if *l == left.id() && *r == right.id() {
                return;
            }
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(ubo) = self.uniform.as_ref() else { return };

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("stereolace interlace bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(left.color_view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(right.color_view()),
                },
            ],
        });

        log::trace!("interlace bind group rebuilt for {:?}/{:?}", left.id(), right.id());
        self.bind_group = Some((left.id(), right.id(), bind_group));
    }

    fn write_uniform(&self, queue: &wgpu::Queue, params: &CompositeParams) {
        let Some(ubo) = self.uniform.as_ref() else { return };
        let u = InterlaceUniform {
            resolution: [
                params.resolution.width as f32,
                params.resolution.height as f32,
            ],
            mode: params.mode.shader_value(),
            _pad: 0,
        };
        queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<InterlaceUniform>(), 16);
    }
}
