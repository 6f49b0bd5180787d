use crate::overlay;
use crate::render;
use orrery_core::{FrameClock, Orrery};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Seconds between overlay stat refreshes.
const STATS_INTERVAL: f32 = 0.5;

pub struct FrameContext<'a> {
    pub orrery: Rc<RefCell<Orrery>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub clock: FrameClock,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub stats_timer: f32,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());

        let mut orrery = self.orrery.borrow_mut();
        let before = orrery.time();
        match orrery.frame(&mut self.clock, gpu) {
            Ok(out) => {
                if let Some(preset) = out.quality {
                    log::info!("[frame] quality now {}", preset.level.name());
                }
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(e) => log::error!("render error: {:?}", e),
        }

        self.stats_timer += orrery.time() - before;
        if self.stats_timer >= STATS_INTERVAL {
            self.stats_timer = 0.0;
            overlay::update_stats(
                &self.document,
                &orrery.fps_display(),
                orrery.quality_preset().level.name(),
                orrery.is_auto_quality(),
            );
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    textures: orrery_core::TextureLibrary<u32>,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, textures).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
