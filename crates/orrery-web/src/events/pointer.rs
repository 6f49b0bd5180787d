use crate::dom;
use crate::input;
use orrery_core::{Orrery, PointerGesture};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const PRIMARY_BUTTON: i16 = 0;
const SECONDARY_BUTTON: i16 = 2;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub orrery: Rc<RefCell<Orrery>>,
    pub gesture: Rc<RefCell<PointerGesture>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_contextmenu(&w);
    wire_wheel(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = dom::pointer_css_pos(&ev, &w.canvas);
        let drag = w.gesture.borrow_mut().moved(pos);

        let mut orrery = w.orrery.borrow_mut();
        orrery.on_pointer_move(pos.x, pos.y);
        if let Some(delta) = drag {
            orrery.on_orbit_drag(delta.x, delta.y);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        match ev.button() {
            PRIMARY_BUTTON => {
                let pos = dom::pointer_css_pos(&ev, &w.canvas);
                w.gesture.borrow_mut().press(pos);
                _ = w.canvas.set_pointer_capture(ev.pointer_id());
            }
            SECONDARY_BUTTON => {
                w.gesture.borrow_mut().cancel();
                if w.orrery.borrow_mut().on_secondary_action() {
                    log::info!("[mouse] secondary action: returning to overview");
                }
            }
            _ => {}
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != PRIMARY_BUTTON {
            return;
        }
        let click = w.gesture.borrow_mut().release();
        if let Some(pos) = click {
            if let Some(id) = w.orrery.borrow_mut().on_pointer_click(pos.x, pos.y) {
                log::info!("[click] body {}", id.0);
            }
        }
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_contextmenu(w: &InputWiring) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let delta = input::wheel_delta_px(ev.delta_y(), ev.delta_mode());
        if delta != 0.0 {
            w.orrery.borrow_mut().on_zoom(delta);
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
