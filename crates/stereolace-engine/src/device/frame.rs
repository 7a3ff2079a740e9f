/// One acquired surface frame.
///
/// Holding it blocks acquisition of the next surface texture, so it must be
/// submitted (or dropped) within the same tick.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    /// Default output target: the interlace pass writes here.
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
