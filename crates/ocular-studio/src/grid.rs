use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use ocular_engine::hmd::HmdError;
use ocular_engine::render::{SceneRenderer, WgpuEyeTarget};

const GRID_COLOR: [f32; 3] = [0.35, 0.38, 0.42];
const X_AXIS_COLOR: [f32; 3] = [0.85, 0.2, 0.2];
const Z_AXIS_COLOR: [f32; 3] = [0.2, 0.35, 0.9];
const POST_COLOR: [f32; 3] = [0.2, 0.8, 0.3];

/// Floor grid with coloured axes and a post at the origin.
///
/// Enough geometry to judge head tracking, IPD and eye height in the
/// headset without loading assets.
pub struct GridScene {
    device: wgpu::Device,
    queue: wgpu::Queue,

    half_extent: i32,
    spacing: f32,

    /// Formats the pipeline was built for.
    pipeline_formats: Option<(wgpu::TextureFormat, wgpu::TextureFormat)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    vertex_count: u32,
}

impl GridScene {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue, half_extent: i32, spacing: f32) -> Self {
        Self {
            device,
            queue,
            half_extent,
            spacing,
            pipeline_formats: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            camera_ubo: None,
            vbo: None,
            vertex_count: 0,
        }
    }

    fn ensure_pipeline(&mut self, color: wgpu::TextureFormat, depth: wgpu::TextureFormat) {
        if self.pipeline_formats == Some((color, depth)) && self.pipeline.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let shader = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("grid shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/grid.wgsl").into()),
        });

        let layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("grid pipeline layout"),
                bind_group_layouts: &[bgl],
                immediate_size: 0,
            });

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("grid pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[GridVertex::layout()],
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
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
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

        log::debug!("grid pipeline built for {color:?} + {depth:?}");
        self.pipeline_formats = Some((color, depth));
        self.pipeline = Some(pipeline);
    }
}

impl SceneRenderer<WgpuEyeTarget> for GridScene {
    fn setup(&mut self) -> Result<(), HmdError> {
        let size = std::num::NonZeroU64::new(std::mem::size_of::<CameraUniform>() as u64)
            .ok_or_else(|| HmdError::resource_allocation("empty camera uniform"))?;

        let bgl = self
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("grid bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(size),
                    },
                    count: None,
                }],
            });

        let camera_ubo = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid camera ubo"),
            size: size.get(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("grid bind group"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        let vertices = grid_vertices(self.half_extent, self.spacing);
        let vbo = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("grid vbo"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        self.vertex_count = vertices.len() as u32;
        self.bind_group_layout = Some(bgl);
        self.camera_ubo = Some(camera_ubo);
        self.bind_group = Some(bind_group);
        self.vbo = Some(vbo);
        self.pipeline = None;

        log::debug!("grid scene ready: {} line vertices", self.vertex_count);
        Ok(())
    }

    fn update_matrix(&mut self, projection: &Mat4, view: &Mat4) {
        let Some(ubo) = self.camera_ubo.as_ref() else { return };
        let u = CameraUniform {
            view_proj: (*projection * *view).to_cols_array_2d(),
        };
        // Applied at the next submit, i.e. this eye's draw.
        self.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn draw(&mut self, target: &WgpuEyeTarget) {
        self.ensure_pipeline(target.color_format(), target.depth_format());

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("grid encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("grid pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: target.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.draw(0..self.vertex_count, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    fn destroy(&mut self) {
        if let Some(vbo) = self.vbo.take() {
            vbo.destroy();
        }
        if let Some(ubo) = self.camera_ubo.take() {
            ubo.destroy();
        }
        self.bind_group = None;
        self.pipeline = None;
        log::debug!("grid scene destroyed");
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GridVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl GridVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GridVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

fn line(a: [f32; 3], b: [f32; 3], color: [f32; 3]) -> [GridVertex; 2] {
    [
        GridVertex { position: a, color },
        GridVertex { position: b, color },
    ]
}

/// Line-list vertices: `2 * half_extent + 1` lines along each floor axis,
/// the axis lines coloured, plus a 2 m post at the origin.
pub fn grid_vertices(half_extent: i32, spacing: f32) -> Vec<GridVertex> {
    let reach = half_extent as f32 * spacing;
    let mut out = Vec::with_capacity(((2 * half_extent + 1) * 4 + 2).max(2) as usize);

    for i in -half_extent..=half_extent {
        let d = i as f32 * spacing;
        let (along_x, along_z) = if i == 0 {
            (X_AXIS_COLOR, Z_AXIS_COLOR)
        } else {
            (GRID_COLOR, GRID_COLOR)
        };
        out.extend(line([-reach, 0.0, d], [reach, 0.0, d], along_x));
        out.extend(line([d, 0.0, -reach], [d, 0.0, reach], along_z));
    }

    out.extend(line([0.0, 0.0, 0.0], [0.0, 2.0, 0.0], POST_COLOR));
    out
}
