use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

use stereolace_engine::backend::gpu::{GpuBackend, GpuEyePass};
use stereolace_engine::backend::SceneRenderer;
use stereolace_engine::rig::{Eye, EyeCamera};

const GRID_HALF_EXTENT: i32 = 12;
const GRID_SPACING: f32 = 6.0;

const SKY: wgpu::Color = wgpu::Color {
    r: 0.05,
    g: 0.07,
    b: 0.12,
    a: 1.0,
};
const LIGHT_DIR: [f32; 4] = [-0.4, -1.0, -0.3, 0.0];

/// Procedural test scene: a field of boxes of varying height on a ground
/// slab. Depth cues at every distance make the stereo separation easy to
/// judge.
pub struct CubeField {
    instances: Vec<BoxInstance>,
    gpu: Option<SceneGpu>,
}

impl CubeField {
    pub fn new() -> Self {
        Self {
            instances: build_instances(),
            gpu: None,
        }
    }

    fn ensure_gpu(
        &mut self,
        device: &wgpu::Device,
        color: wgpu::TextureFormat,
        depth: wgpu::TextureFormat,
    ) -> &SceneGpu {
        if self.gpu.as_ref().is_some_and(|g| g.formats != (color, depth)) {
            self.gpu = None;
        }
        self.gpu
            .get_or_insert_with(|| SceneGpu::new(device, color, depth, &self.instances))
    }
}

impl Default for CubeField {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, 'w> SceneRenderer<GpuBackend<'a, 'w>> for CubeField {
    fn render_into(&mut self, pass: &mut GpuEyePass<'_>, camera: &EyeCamera) -> anyhow::Result<()> {
        let (device, queue) = (pass.device, pass.queue);
        let gpu = self.ensure_gpu(device, pass.color_format, pass.depth_format);

        // One uniform buffer per eye: both writes land before the single
        // submit, so a shared buffer would leave both eyes with the right view.
        let eye = &gpu.eyes[eye_slot(camera.eye)];
        let uniform = CameraUniform {
            view_proj: camera.view_proj().to_cols_array_2d(),
            light_dir: LIGHT_DIR,
        };
        queue.write_buffer(&eye.uniform, 0, bytemuck::bytes_of(&uniform));

        let mut rpass = pass.begin_render_pass(SKY);
        rpass.set_pipeline(&gpu.pipeline);
        rpass.set_bind_group(0, &eye.bind_group, &[]);
        rpass.set_vertex_buffer(0, gpu.vertices.slice(..));
        rpass.set_vertex_buffer(1, gpu.instances.slice(..));
        rpass.set_index_buffer(gpu.indices.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..gpu.index_count, 0, 0..gpu.instance_count);
        Ok(())
    }
}

fn eye_slot(eye: Eye) -> usize {
    match eye {
        Eye::Left => 0,
        Eye::Right => 1,
    }
}

struct EyeBinding {
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct SceneGpu {
    formats: (wgpu::TextureFormat, wgpu::TextureFormat),
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    instances: wgpu::Buffer,
    instance_count: u32,
    eyes: [EyeBinding; 2],
}

impl SceneGpu {
    fn new(
        device: &wgpu::Device,
        color: wgpu::TextureFormat,
        depth: wgpu::TextureFormat,
        instances: &[BoxInstance],
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("stereolace scene shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("stereolace scene bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<CameraUniform>() as u64),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("stereolace scene pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("stereolace scene pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout(), BoxInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let (mesh, mesh_indices) = box_mesh();
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stereolace scene box vbo"),
            contents: bytemuck::cast_slice(&mesh),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stereolace scene box ibo"),
            contents: bytemuck::cast_slice(&mesh_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("stereolace scene instance vbo"),
            contents: bytemuck::cast_slice(instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let eye_binding = |label: &str| {
            let uniform = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<CameraUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform.as_entire_binding(),
                }],
            });
            EyeBinding { uniform, bind_group }
        };

        log::debug!("scene pipeline built for {color:?}/{depth:?}, {} boxes", instances.len());

        Self {
            formats: (color, depth),
            pipeline,
            vertices,
            indices,
            index_count: mesh_indices.len() as u32,
            instances: instance_buffer,
            instance_count: instances.len() as u32,
            eyes: [
                eye_binding("stereolace scene left camera"),
                eye_binding("stereolace scene right camera"),
            ],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct MeshVertex {
    position: [f32; 3],
    normal: [f32; 3],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // normal
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct BoxInstance {
    offset: [f32; 3],
    scale: [f32; 3],
    color: [f32; 4],
}

impl BoxInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        2 => Float32x3, // offset
        3 => Float32x3, // scale
        4 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BoxInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit box standing on the origin: x and z in `[-0.5, 0.5]`, y in `[0, 1]`.
/// Faces wind counter-clockwise seen from outside.
fn box_mesh() -> (Vec<MeshVertex>, Vec<u16>) {
    // (normal, u, v) with u × v = normal.
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];
    let center = Vec3::new(0.0, 0.5, 0.0);

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = vertices.len() as u16;
        let face = center + normal * 0.5;
        for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            vertices.push(MeshVertex {
                position: (face + u * su + v * sv).to_array(),
                normal: normal.to_array(),
            });
        }
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

fn build_instances() -> Vec<BoxInstance> {
    let n = GRID_HALF_EXTENT;
    let mut out = Vec::with_capacity(((2 * n + 1) * (2 * n + 1)) as usize + 1);

    let ground = (2 * n + 4) as f32 * GRID_SPACING;
    out.push(BoxInstance {
        offset: [0.0, -0.2, 0.0],
        scale: [ground, 0.2, ground],
        color: [0.18, 0.2, 0.22, 1.0],
    });

    for gz in -n..=n {
        for gx in -n..=n {
            let (fx, fz) = (gx as f32, gz as f32);
            let height = 1.0 + 5.0 * (fx * 0.7 + fz * 1.3).sin().abs() * (fx * 0.3 - fz * 0.5).cos().abs();
            let (tx, tz) = ((fx / n as f32 + 1.0) * 0.5, (fz / n as f32 + 1.0) * 0.5);
            out.push(BoxInstance {
                offset: [fx * GRID_SPACING, 0.0, fz * GRID_SPACING],
                scale: [2.0, height, 2.0],
                color: [0.25 + 0.7 * tx, 0.35 + 0.4 * (1.0 - tz), 0.3 + 0.6 * tz, 1.0],
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_faces_wind_outward() {
        let (vertices, indices) = box_mesh();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        for tri in indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|i| Vec3::from_array(vertices[tri[i] as usize].position));
            let n = Vec3::from_array(vertices[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
        }
    }

    #[test]
    fn instances_cover_grid_plus_ground() {
        let side = (2 * GRID_HALF_EXTENT + 1) as usize;
        let instances = build_instances();
        assert_eq!(instances.len(), side * side + 1);
        assert!(instances.iter().all(|i| i.scale.iter().all(|s| *s > 0.0)));
    }

    #[test]
    fn uniform_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }
}
