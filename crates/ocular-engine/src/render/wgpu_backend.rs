use crate::coords::{Eye, EyeViewport, Size};
use crate::hmd::{HmdError, TextureHandle};

use super::{RenderBackend, TargetDesc};

/// Eye target backed by two wgpu textures.
pub struct WgpuEyeTarget {
    eye: Eye,
    handle: TextureHandle,
    size: Size,
    color: wgpu::Texture,
    color_view: wgpu::TextureView,
    depth: wgpu::Texture,
    depth_view: wgpu::TextureView,
}

impl WgpuEyeTarget {
    pub fn eye(&self) -> Eye {
        self.eye
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn color_texture(&self) -> &wgpu::Texture {
        &self.color
    }

    pub fn color_view(&self) -> &wgpu::TextureView {
        &self.color_view
    }

    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.color.format()
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    pub fn depth_format(&self) -> wgpu::TextureFormat {
        self.depth.format()
    }
}

/// Views of the currently bound target.
struct Bound {
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
}

/// [`RenderBackend`] on a wgpu device.
///
/// wgpu has no global framebuffer binding, so "bound" means the backend
/// remembers which views the next clear records into. Clears are submitted
/// immediately so the scene renderer's own submissions land after them.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    color_format: wgpu::TextureFormat,
    next_handle: u64,
    viewport: Option<EyeViewport>,
    bound: Option<Bound>,
}

impl WgpuBackend {
    /// `color_format` should match the mirror surface so eye images can be
    /// copied onto it without conversion.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue, color_format: wgpu::TextureFormat) -> Self {
        Self {
            device,
            queue,
            color_format,
            next_handle: 1,
            viewport: None,
            bound: None,
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn color_format(&self) -> wgpu::TextureFormat {
        self.color_format
    }

    fn depth_format(min_depth_bits: u32) -> wgpu::TextureFormat {
        if min_depth_bits <= 24 {
            wgpu::TextureFormat::Depth24Plus
        } else {
            wgpu::TextureFormat::Depth32Float
        }
    }

    fn create_texture(
        &self,
        label: &str,
        size: Size,
        format: wgpu::TextureFormat,
        usage: wgpu::TextureUsages,
    ) -> wgpu::Texture {
        self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage,
            view_formats: &[],
        })
    }
}

impl RenderBackend for WgpuBackend {
    type Target = WgpuEyeTarget;

    fn create_target(&mut self, desc: TargetDesc) -> Result<WgpuEyeTarget, HmdError> {
        let TargetDesc { eye, size, min_depth_bits } = desc;

        let max = self.device.limits().max_texture_dimension_2d;
        if size.is_empty() || size.width > max || size.height > max {
            return Err(HmdError::resource_allocation(format!(
                "{eye:?} target {}x{} outside device limits (max {max})",
                size.width, size.height
            )));
        }
        if min_depth_bits > 32 {
            return Err(HmdError::resource_allocation(format!(
                "no depth format with {min_depth_bits} bits"
            )));
        }

        let color = self.create_texture(
            "ocular eye color",
            size,
            self.color_format,
            wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
        );
        let depth = self.create_texture(
            "ocular eye depth",
            size,
            Self::depth_format(min_depth_bits),
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );

        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());

        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;

        Ok(WgpuEyeTarget {
            eye,
            handle,
            size,
            color,
            color_view,
            depth,
            depth_view,
        })
    }

    fn native_handle(&self, target: &WgpuEyeTarget) -> TextureHandle {
        target.handle
    }

    fn set_viewport(&mut self, viewport: EyeViewport) {
        self.viewport = Some(viewport);
    }

    fn bind_target(&mut self, target: &WgpuEyeTarget) {
        self.bound = Some(Bound {
            color_view: target.color_view.clone(),
            depth_view: target.depth_view.clone(),
        });
    }

    fn clear(&mut self, color: [f64; 4]) {
        let Some(bound) = self.bound.as_ref() else {
            log::warn!("clear with no eye target bound; ignored");
            return;
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("ocular eye clear encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ocular eye clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &bound.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: color[0],
                            g: color[1],
                            b: color[2],
                            a: color[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &bound.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(vp) = self.viewport {
                rpass.set_viewport(
                    vp.x as f32,
                    vp.y as f32,
                    vp.width() as f32,
                    vp.height() as f32,
                    0.0,
                    1.0,
                );
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    fn unbind_target(&mut self) {
        self.bound = None;
    }

    fn restore_default_state(&mut self) {
        self.viewport = None;
    }

    fn destroy_target(&mut self, target: WgpuEyeTarget) {
        target.color.destroy();
        target.depth.destroy();
    }
}
