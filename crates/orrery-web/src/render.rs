mod bodies;
mod helpers;
mod post;
mod targets;

use bodies::{BodiesPass, Globals};
use orrery_core::{
    material_for, BodyInstance, Camera, QualityLevel, QualityPreset, Renderer, SceneFrame,
    TextureLibrary,
};
use post::{PostBindGroups, PostResources, PostSlot, PostUniforms};
use targets::RenderTargets;
use web_sys as web;

const BLOOM_THRESHOLD: f32 = 1.0;
const HOVER_HIGHLIGHT: f32 = 1.0;
const SELECTED_HIGHLIGHT: f32 = 0.35;

// ===================== WebGPU state =====================

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    bodies: BodiesPass,
    post: PostResources,
    targets: RenderTargets,
    post_groups: PostBindGroups,

    textures: TextureLibrary<u32>,
    instances: Vec<BodyInstance>,
    preset: QualityPreset,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        textures: TextureLibrary<u32>,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let preset = QualityLevel::High.preset();
        let (tw, th) = helpers::scaled_size(width, height, preset.resolution_scale);
        let targets = RenderTargets::new(&device, tw, th);

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(orrery_core::POST_WGSL.into()),
        });
        let post = post::create_post_resources(&device, &post_shader, format);
        let post_groups = post.bind_groups(&device, &targets);
        let bodies = BodiesPass::new(&device);

        log::info!(
            "[gpu] surface {}x{} format {:?}, {} textures",
            width,
            height,
            format,
            textures.len()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            bodies,
            post,
            targets,
            post_groups,
            textures,
            instances: Vec::new(),
            preset,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.rebuild_targets();
    }

    /// Reconfigures the surface after it was lost or became outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn rebuild_targets(&mut self) {
        let (w, h) = helpers::scaled_size(
            self.config.width,
            self.config.height,
            self.preset.resolution_scale,
        );
        if w == self.targets.width && h == self.targets.height {
            return;
        }
        self.targets.recreate(&self.device, w, h);
        self.post_groups = self.post.bind_groups(&self.device, &self.targets);
    }

    fn collect_instances(&mut self, scene: &SceneFrame<'_>) {
        self.instances.clear();
        for body in scene.bodies.iter() {
            let highlight = if scene.hovered == Some(body.id) {
                HOVER_HIGHLIGHT
            } else if scene.selected == Some(body.id) {
                SELECTED_HIGHLIGHT
            } else {
                0.0
            };
            let material = material_for(body, scene.time, &self.textures);
            self.instances
                .push(BodyInstance::from_body(body, material.texture, highlight));
        }
    }

    fn post_uniforms(&self, time: f32) -> PostUniforms {
        let (bw, bh) = self.targets.bloom_size();
        PostUniforms {
            resolution: [bw as f32, bh as f32],
            time,
            bloom_on: if self.preset.bloom_enabled { 1.0 } else { 0.0 },
            blur_dir: [0.0, 0.0],
            bloom_strength: self.preset.bloom_strength,
            threshold: BLOOM_THRESHOLD,
        }
    }
}

impl Renderer for GpuState<'_> {
    type Error = wgpu::SurfaceError;

    fn apply_quality(&mut self, preset: &QualityPreset) {
        log::info!(
            "[gpu] quality {} (scale {:.2}, bloom {}, detail {})",
            preset.level.name(),
            preset.resolution_scale,
            preset.bloom_enabled,
            preset.tessellation
        );
        self.preset = *preset;
        self.rebuild_targets();
    }

    fn render(&mut self, scene: &SceneFrame<'_>, camera: &Camera) -> Result<(), Self::Error> {
        let frame = self.surface.get_current_texture()?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.collect_instances(scene);
        let globals = Globals::new(camera, scene.time, self.preset.tessellation);
        self.bodies
            .upload(&self.device, &self.queue, &globals, &self.instances);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        self.bodies.draw(&mut encoder, &self.targets);

        let base = self.post_uniforms(scene.time);
        let black = wgpu::Color::BLACK;
        let groups = &self.post_groups;
        if self.preset.bloom_enabled {
            self.post.write(&self.queue, PostSlot::Bright, &base);
            self.post.write(
                &self.queue,
                PostSlot::BlurH,
                &PostUniforms {
                    blur_dir: [1.0, 0.0],
                    ..base
                },
            );
            self.post.write(
                &self.queue,
                PostSlot::BlurV,
                &PostUniforms {
                    blur_dir: [0.0, 1.0],
                    ..base
                },
            );
            post::blit(
                &mut encoder,
                "bright_pass",
                &self.targets.bloom_a_view,
                black,
                &self.post.bright_pipeline,
                &groups.bright,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_h",
                &self.targets.bloom_b_view,
                black,
                &self.post.blur_pipeline,
                &groups.blur_h,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_v",
                &self.targets.bloom_a_view,
                black,
                &self.post.blur_pipeline,
                &groups.blur_v,
                None,
            );
        }
        self.post.write(&self.queue, PostSlot::Composite, &base);
        post::blit(
            &mut encoder,
            "composite",
            &swap_view,
            black,
            &self.post.composite_pipeline,
            &groups.composite,
            Some(&groups.bloom),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
