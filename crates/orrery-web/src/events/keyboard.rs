use crate::overlay;
use orrery_core::{command_for_key, Command, Orrery};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    orrery: &Rc<RefCell<Orrery>>,
    document: &web::Document,
) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(command) = command_for_key(&ev.key()) else {
        return;
    };
    if command == Command::ToggleHelp {
        overlay::toggle(document);
    } else {
        orrery.borrow_mut().apply_command(command);
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(orrery: Rc<RefCell<Orrery>>, document: web::Document) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &orrery, &document);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
