/// An acquired mirror surface texture plus the encoder recording into it.
///
/// Holding the surface texture blocks acquisition of the next one, so finish
/// with [`Gpu::present`](super::Gpu::present) promptly.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
