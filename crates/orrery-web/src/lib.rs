#![cfg(target_arch = "wasm32")]
use instant::Instant;
use orrery_core::{
    FrameClock, Orrery, OrreryConfig, PointerGesture, QualityLevel, TextureLibrary,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod query;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("orrery-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let started = Instant::now();
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let params = dom::query_params();
    let config = OrreryConfig::from_lookup(|key| params.config_value(key));
    let orrery = Orrery::new(config).map_err(|e| anyhow::anyhow!("scene setup failed: {e}"))?;
    let orrery = Rc::new(RefCell::new(orrery));

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    {
        let css = dom::sync_canvas_backing_size(&canvas);
        orrery.borrow_mut().resize(css.x, css.y);
        let canvas_resize = canvas.clone();
        let orrery_resize = orrery.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            let css = dom::sync_canvas_backing_size(&canvas_resize);
            orrery_resize.borrow_mut().resize(css.x, css.y);
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
            .ok();
        resize_closure.forget();
    }

    // Surface patterns are procedural; each texture key gets its own pattern id.
    let mut textures = TextureLibrary::new();
    let mut names = Vec::new();
    for body in orrery.borrow().bodies().iter() {
        if let Some(key) = &body.texture {
            textures.insert(key.clone(), body.id.0);
        }
        names.push(body.name.clone());
    }

    let gpu = frame::init_gpu(&canvas, textures).await;
    if gpu.is_some() {
        // bodies become pickable once their visuals exist
        orrery.borrow_mut().attach_meshes();
    }

    {
        let mut o = orrery.borrow_mut();
        o.add_listener(Box::new(overlay::OverlayListener::new(
            document.clone(),
            canvas.clone(),
            names,
        )));
        if let Some(level) = params.get("quality").and_then(QualityLevel::parse) {
            o.set_quality_override(level);
        }
    }

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        orrery: orrery.clone(),
        gesture: Rc::new(RefCell::new(PointerGesture::default())),
    });
    events::wire_global_keydown(orrery.clone(), document.clone());
    {
        let doc = document.clone();
        dom::add_click_listener(&document, "help-toggle", move || overlay::toggle(&doc));
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        orrery,
        gpu,
        clock: FrameClock::new(),
        canvas,
        document,
        stats_timer: 0.0,
    }));
    frame::start_loop(frame_ctx);
    log::info!(
        "[init] ready in {:.0} ms",
        started.elapsed().as_secs_f32() * 1000.0
    );
    Ok(())
}
