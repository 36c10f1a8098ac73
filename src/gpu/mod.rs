//! wgpu presentation of a recorded [`DrawList`].
//!
//! Each frame the draw list is flattened into two vertex buffers: one line
//! vertex pair per guide ray and one instance per filled rectangle. Lines are
//! drawn first, then rectangles, matching the order the kaleidoscope records
//! them in.

mod shader;

use std::sync::Arc;

use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::color::Color;
use crate::error::GpuError;
use crate::surface::DrawList;

pub use shader::{LineVertex, RectInstance, Viewport, SHADER_SOURCE};

const RECT_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];
const LINE_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

/// Initial buffer capacity in elements; buffers grow by doubling.
const INITIAL_CAPACITY: usize = 256;

pub struct GpuRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    rect_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    viewport_bind_group: wgpu::BindGroup,
    rect_buffer: GrowableBuffer,
    line_buffer: GrowableBuffer,
    // Colors are authored in sRGB; sRGB targets expect linear values.
    linear_output: bool,
}

impl GpuRenderer {
    /// Set up the device and pipelines for `window`.
    ///
    /// `canvas_size` is the logical drawing area; it is stretched over the
    /// window regardless of the window's physical size.
    pub async fn new(window: Arc<Window>, canvas_size: Vec2) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Kaleidoscope Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        log::info!(
            "GPU surface: {:?} {}x{} ({})",
            surface_format,
            config.width,
            config.height,
            adapter.get_info().name
        );

        let viewport = Viewport {
            size: canvas_size.to_array(),
            _padding: [0.0; 2],
        };
        let viewport_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Viewport Buffer"),
            contents: bytemuck::cast_slice(&[viewport]),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let viewport_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Viewport Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Viewport Bind Group"),
            layout: &viewport_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Kaleidoscope Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Kaleidoscope Pipeline Layout"),
            bind_group_layouts: &[&viewport_bind_group_layout],
            push_constant_ranges: &[],
        });

        let rect_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            PipelineKind {
                label: "Rect Pipeline",
                entry_point: "vs_rect",
                layout: wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<RectInstance>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &RECT_ATTRIBUTES,
                },
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );

        let line_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            config.format,
            PipelineKind {
                label: "Line Pipeline",
                entry_point: "vs_line",
                layout: wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &LINE_ATTRIBUTES,
                },
                topology: wgpu::PrimitiveTopology::LineList,
            },
        );

        let rect_buffer = GrowableBuffer::new(
            &device,
            "Rect Instance Buffer",
            std::mem::size_of::<RectInstance>(),
        );
        let line_buffer =
            GrowableBuffer::new(&device, "Line Vertex Buffer", std::mem::size_of::<LineVertex>());

        Ok(Self {
            surface,
            device,
            queue,
            linear_output: config.format.is_srgb(),
            config,
            rect_pipeline,
            line_pipeline,
            viewport_bind_group,
            rect_buffer,
            line_buffer,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn gpu_color(&self, color: Color) -> [f32; 4] {
        if self.linear_output {
            color.to_linear()
        } else {
            [color.r, color.g, color.b, color.a]
        }
    }

    /// Present one recorded frame.
    pub fn render(&mut self, list: &DrawList) -> Result<(), wgpu::SurfaceError> {
        let rects: Vec<RectInstance> = list
            .rects()
            .map(|(origin, size, color)| RectInstance {
                origin: origin.to_array(),
                size: size.to_array(),
                color: self.gpu_color(color),
            })
            .collect();
        let lines: Vec<LineVertex> = list
            .lines()
            .flat_map(|(from, to, color)| {
                let color = self.gpu_color(color);
                [
                    LineVertex {
                        position: from.to_array(),
                        color,
                    },
                    LineVertex {
                        position: to.to_array(),
                        color,
                    },
                ]
            })
            .collect();

        self.rect_buffer
            .upload(&self.device, &self.queue, bytemuck::cast_slice(&rects), rects.len());
        self.line_buffer
            .upload(&self.device, &self.queue, bytemuck::cast_slice(&lines), lines.len());

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let [r, g, b, a] = self.gpu_color(list.background());
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Kaleidoscope Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.viewport_bind_group, &[]);

            if !lines.is_empty() {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_vertex_buffer(0, self.line_buffer.buffer.slice(..));
                render_pass.draw(0..lines.len() as u32, 0..1);
            }

            if !rects.is_empty() {
                render_pass.set_pipeline(&self.rect_pipeline);
                render_pass.set_vertex_buffer(0, self.rect_buffer.buffer.slice(..));
                render_pass.draw(0..6, 0..rects.len() as u32);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

struct PipelineKind<'a> {
    label: &'static str,
    entry_point: &'static str,
    layout: wgpu::VertexBufferLayout<'a>,
    topology: wgpu::PrimitiveTopology,
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    kind: PipelineKind<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(kind.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(kind.entry_point),
            buffers: &[kind.layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: kind.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Vertex buffer that is reallocated at twice the size when it runs out.
struct GrowableBuffer {
    buffer: wgpu::Buffer,
    label: &'static str,
    stride: usize,
    capacity: usize,
}

impl GrowableBuffer {
    fn new(device: &wgpu::Device, label: &'static str, stride: usize) -> Self {
        Self {
            buffer: allocate(device, label, stride * INITIAL_CAPACITY),
            label,
            stride,
            capacity: INITIAL_CAPACITY,
        }
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8], len: usize) {
        if len > self.capacity {
            self.capacity = len.next_power_of_two();
            self.buffer = allocate(device, self.label, self.stride * self.capacity);
            log::debug!("{} grown to {} elements", self.label, self.capacity);
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
    }
}

fn allocate(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
