use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use orrery_core::{
    command_for_key, material_for, BodyId, BodyInstance, Camera, FrameClock, InteractionListener,
    InteractionState, Orrery, OrreryConfig, PointerGesture, QualityPreset, Renderer, SceneFrame,
    TextureLibrary,
};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
/// Pixels per scroll line, matching the browser's line delta.
const WHEEL_LINE_PX: f32 = 16.0;
const TITLE_INTERVAL: f32 = 0.5;

const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 12] = wgpu::vertex_attr_array![
    1 => Float32x3,
    2 => Float32,
    3 => Float32x3,
    4 => Uint32,
    5 => Float32x4,
    6 => Float32x2,
    7 => Float32,
    8 => Float32,
    9 => Float32,
    10 => Float32,
    11 => Uint32,
    12 => Uint32,
];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    eye_time: [f32; 4],
    right_pad: [f32; 4],
    up_pad: [f32; 4],
    detail: [f32; 4],
}

struct GpuState<'w> {
    window: &'w Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_capacity: usize,
    depth_view: wgpu::TextureView,
    textures: TextureLibrary<u32>,
    instances: Vec<BodyInstance>,
    preset: QualityPreset,
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_vb"),
        size: (std::mem::size_of::<BodyInstance>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w Window, textures: TextureLibrary<u32>) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("bodies_shader"),
            source: wgpu::ShaderSource::Wgsl(orrery_core::BODIES_WGSL.into()),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_capacity = 16;
        let instance_vb = create_instance_buffer(&device, instance_capacity);
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: instance data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<BodyInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRS,
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let depth_view = create_depth_view(&device, config.width, config.height);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            bind_group,
            quad_vb,
            instance_vb,
            instance_capacity,
            depth_view,
            textures,
            instances: Vec::new(),
            preset: orrery_core::QualityLevel::High.preset(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, new_size.width, new_size.height);
    }

    fn reconfigure(&mut self) {
        self.resize(self.window.inner_size());
    }
}

impl Renderer for GpuState<'_> {
    type Error = wgpu::SurfaceError;

    fn apply_quality(&mut self, preset: &QualityPreset) {
        // the swapchain is drawn directly, so only the detail hint applies here
        log::info!(
            "[gpu] quality {} (detail {})",
            preset.level.name(),
            preset.tessellation
        );
        self.preset = *preset;
    }

    fn render(&mut self, scene: &SceneFrame<'_>, camera: &Camera) -> Result<(), Self::Error> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals {
                view_proj: camera.view_proj().to_cols_array_2d(),
                eye_time: camera.eye.extend(scene.time).to_array(),
                right_pad: camera.right().extend(0.0).to_array(),
                up_pad: camera.up_axis().extend(0.0).to_array(),
                detail: [self.preset.tessellation as f32, 0.0, 0.0, 0.0],
            }),
        );

        self.instances.clear();
        for body in scene.bodies.iter() {
            let highlight = if scene.hovered == Some(body.id) {
                1.0
            } else if scene.selected == Some(body.id) {
                0.35
            } else {
                0.0
            };
            let material = material_for(body, scene.time, &self.textures);
            self.instances
                .push(BodyInstance::from_body(body, material.texture, highlight));
        }
        if self.instances.len() > self.instance_capacity {
            self.instance_capacity = self.instances.len().next_power_of_two();
            self.instance_vb = create_instance_buffer(&self.device, self.instance_capacity);
        }
        self.queue
            .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&self.instances));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.004,
                            g: 0.005,
                            b: 0.012,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..QUAD_CORNERS.len() as u32, 0..self.instances.len() as u32);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Logs interaction changes with body names.
struct LogListener {
    names: Vec<String>,
}

impl LogListener {
    fn name(&self, id: BodyId) -> &str {
        self.names.get(id.0 as usize).map_or("?", String::as_str)
    }
}

impl InteractionListener for LogListener {
    fn on_state_change(&mut self, state: InteractionState, body: Option<BodyId>) {
        match body {
            Some(id) => log::info!("[state] {:?} ({})", state, self.name(id)),
            None => log::info!("[state] {:?}", state),
        }
    }

    fn on_body_hover(&mut self, body: Option<BodyId>) {
        if let Some(id) = body {
            log::debug!("[hover] {}", self.name(id));
        }
    }

    fn on_body_select(&mut self, body: BodyId) {
        log::info!("[select] {}", self.name(body));
    }
}

/// DOM-style name of a winit key, as understood by [`command_for_key`].
fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Named(NamedKey::Escape) => Some("Escape"),
        Key::Named(NamedKey::Backspace) => Some("Backspace"),
        Key::Character(c) => Some(c.as_str()),
        _ => None,
    }
}

fn handle_key(orrery: &mut Orrery, key: &Key) {
    if let Some(command) = key_name(key).and_then(command_for_key) {
        // no help overlay natively
        orrery.apply_command(command);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut orrery = Orrery::new(OrreryConfig::from_env())?;

    let mut textures = TextureLibrary::new();
    let mut names = Vec::new();
    for body in orrery.bodies().iter() {
        if let Some(key) = &body.texture {
            textures.insert(key.clone(), body.id.0);
        }
        names.push(body.name.clone());
    }
    orrery.add_listener(Box::new(LogListener { names }));

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Orrery")
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window, textures))?;
    orrery.attach_meshes();
    let logical = window.inner_size().to_logical::<f32>(window.scale_factor());
    orrery.resize(logical.width, logical.height);

    let mut clock = FrameClock::new();
    let mut gesture = PointerGesture::default();
    let mut cursor = Vec2::ZERO;
    let mut title_timer = 0.0f32;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                state.resize(size);
                let logical = size.to_logical::<f32>(state.window.scale_factor());
                orrery.resize(logical.width, logical.height);
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                let p = position.to_logical::<f32>(state.window.scale_factor());
                cursor = Vec2::new(p.x, p.y);
                orrery.on_pointer_move(cursor.x, cursor.y);
                if let Some(delta) = gesture.moved(cursor) {
                    orrery.on_orbit_drag(delta.x, delta.y);
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => match (button, button_state) {
                (MouseButton::Left, ElementState::Pressed) => gesture.press(cursor),
                (MouseButton::Left, ElementState::Released) => {
                    if let Some(at) = gesture.release() {
                        if let Some(id) = orrery.on_pointer_click(at.x, at.y) {
                            log::info!("[click] body {}", id.0);
                        }
                    }
                }
                (MouseButton::Right, ElementState::Pressed) => {
                    gesture.cancel();
                    orrery.on_secondary_action();
                }
                _ => {}
            },
            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scroll-up as positive; zoom expects browser sign
                let px = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                orrery.on_zoom(px);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => handle_key(&mut orrery, &logical_key),
            _ => {}
        },
        Event::AboutToWait => {
            let before = orrery.time();
            match orrery.frame(&mut clock, &mut state) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::error!("render error: {:?}", e),
            }
            title_timer += orrery.time() - before;
            if title_timer >= TITLE_INTERVAL {
                title_timer = 0.0;
                let focus = orrery
                    .selected()
                    .and_then(|id| orrery.bodies().get(id))
                    .map_or("overview", |b| b.name.as_str());
                state.window.set_title(&format!(
                    "Orrery | {} | {} | {}",
                    orrery.fps_display(),
                    orrery.quality_preset().level.name(),
                    focus
                ));
            }
        }
        _ => {}
    })?;
    Ok(())
}
