/// GPU initialization parameters.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format. Eye targets use the surface format so
    /// they can be copied onto the mirror without conversion.
    pub prefer_srgb: bool,

    /// Mirror present mode. The headset paces frames, so the mirror should
    /// not add its own vsync wait on top.
    pub present_mode: wgpu::PresentMode,

    pub power_preference: wgpu::PowerPreference,

    pub required_features: wgpu::Features,

    /// Limits requested from the adapter. Eye targets are checked against
    /// `max_texture_dimension_2d`.
    pub required_limits: wgpu::Limits,

    /// Maximum queued mirror frames (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::AutoNoVsync,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 1,
        }
    }
}
