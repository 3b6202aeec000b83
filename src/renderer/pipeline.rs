//! WebGPU render pipeline setup

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Map a screen-space point to normalized device coordinates
///
/// The 400x600 playfield is letterboxed into the viewport, keeping its
/// aspect ratio. Screen y grows downward, NDC y grows upward.
pub fn screen_to_ndc(p: Vec2, viewport: (u32, u32)) -> Vec2 {
    let (w, h) = viewport;
    let viewport_aspect = w as f32 / h.max(1) as f32;
    let game_aspect = SCREEN_WIDTH / SCREEN_HEIGHT;

    let scale = if viewport_aspect > game_aspect {
        // Wider than the playfield: bars left and right
        Vec2::new(game_aspect / viewport_aspect, 1.0)
    } else {
        // Taller than the playfield: bars top and bottom
        Vec2::new(1.0, viewport_aspect / game_aspect)
    };

    let ndc = Vec2::new(
        p.x / SCREEN_WIDTH * 2.0 - 1.0,
        1.0 - p.y / SCREEN_HEIGHT * 2.0,
    );
    ndc * scale
}

/// Vertices the first vertex buffer can hold before it has to grow
const INITIAL_VERTEX_CAPACITY: usize = 1024;

/// Buffer capacity able to hold `needed` vertices, doubling from `current`
pub fn grow_capacity(current: usize, needed: usize) -> usize {
    let mut capacity = current.max(1);
    while capacity < needed {
        capacity *= 2;
    }
    capacity
}

/// Why the renderer could not start
#[derive(Debug)]
pub enum RenderInitError {
    Device(wgpu::RequestDeviceError),
    /// The surface reports no usable texture format or alpha mode
    IncompatibleSurface,
}

impl std::fmt::Display for RenderInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Device(e) => write!(f, "device request failed: {e}"),
            Self::IncompatibleSurface => write!(f, "surface has no supported format"),
        }
    }
}

impl std::error::Error for RenderInitError {}

impl From<wgpu::RequestDeviceError> for RenderInitError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        Self::Device(e)
    }
}

/// Triangle-list pipeline drawing pre-colored vertices with alpha blending
fn create_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("leap_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("leap_pipeline_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("leap_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                // Particles fade out through vertex alpha
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("leap_vertices"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// GPU side of the game: one surface, one pipeline, one reusable vertex buffer
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    /// Vertices `vertex_buffer` can hold
    vertex_capacity: usize,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderInitError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("leap-and-avoid-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let caps = surface.get_capabilities(adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(RenderInitError::IncompatibleSurface)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(RenderInitError::IncompatibleSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("Surface configured: {:?} {}x{}", format, config.width, config.height);

        let pipeline = create_pipeline(&device, format);
        let vertex_buffer = create_vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);
        let size = (config.width, config.height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            size,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Convert screen-space vertices to NDC and write them into the vertex
    /// buffer, growing it first if the frame does not fit
    fn upload(&mut self, vertices: &[Vertex]) -> u32 {
        let ndc: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let p = screen_to_ndc(Vec2::from(v.position), self.size);
                Vertex::new(p.x, p.y, v.color)
            })
            .collect();

        if ndc.len() > self.vertex_capacity {
            self.vertex_capacity = grow_capacity(self.vertex_capacity, ndc.len());
            self.vertex_buffer = create_vertex_buffer(&self.device, self.vertex_capacity);
            log::debug!("Vertex buffer grown to {} vertices", self.vertex_capacity);
        }
        if !ndc.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&ndc));
        }
        ndc.len() as u32
    }

    /// Draw one frame of screen-space vertices over the background
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let vertex_count = self.upload(vertices);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("leap_frame"),
            });

        {
            let [r, g, b, a] = colors::BACKGROUND.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("leap_frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if vertex_count > 0 {
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.draw(0..vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_corners_match_playfield_aspect() {
        // Viewport with the same 2:3 aspect fills NDC exactly
        let vp = (400, 600);
        assert!(approx(screen_to_ndc(Vec2::ZERO, vp), Vec2::new(-1.0, 1.0)));
        assert!(approx(
            screen_to_ndc(Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT), vp),
            Vec2::new(1.0, -1.0)
        ));
    }

    #[test]
    fn test_wide_viewport_letterboxes_horizontally() {
        let p = screen_to_ndc(Vec2::new(SCREEN_WIDTH, 0.0), (1200, 600));
        assert!(approx(p, Vec2::new(1.0 / 3.0, 1.0)));
    }

    #[test]
    fn test_tall_viewport_letterboxes_vertically() {
        let p = screen_to_ndc(Vec2::new(0.0, 0.0), (400, 1200));
        assert!(approx(p, Vec2::new(-1.0, 0.5)));
    }

    #[test]
    fn test_grow_capacity() {
        assert_eq!(grow_capacity(1024, 10), 1024);
        assert_eq!(grow_capacity(1024, 1024), 1024);
        assert_eq!(grow_capacity(1024, 1025), 2048);
        assert_eq!(grow_capacity(1024, 5000), 8192);
        assert_eq!(grow_capacity(0, 3), 4);
    }
}
