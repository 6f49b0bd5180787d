use crate::dom;
use orrery_core::{BodyId, InteractionListener, InteractionState};
use web_sys as web;

const HELP_ID: &str = "help-overlay";

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HELP_ID) {
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HELP_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(HELP_ID)
        .and_then(|el| el.get_attribute("style"))
        .map(|s| s.contains("display:none"))
        .unwrap_or(false)
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

pub fn update_stats(document: &web::Document, fps: &str, quality: &str, auto: bool) {
    dom::set_text(document, "fps", fps);
    let label = if auto {
        format!("{quality} (auto)")
    } else {
        quality.to_string()
    };
    dom::set_text(document, "quality-label", &label);
}

/// Mirrors interaction notifications into the page labels.
pub struct OverlayListener {
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    names: Vec<String>,
}

impl OverlayListener {
    /// `names` is indexed by `BodyId`.
    pub fn new(document: web::Document, canvas: web::HtmlCanvasElement, names: Vec<String>) -> Self {
        Self {
            document,
            canvas,
            names,
        }
    }

    fn name(&self, id: BodyId) -> &str {
        self.names.get(id.0 as usize).map_or("?", String::as_str)
    }
}

impl InteractionListener for OverlayListener {
    fn on_state_change(&mut self, state: InteractionState, body: Option<BodyId>) {
        let text = match (state, body) {
            (InteractionState::Overview, _) => "Solar system".to_string(),
            (InteractionState::Transitioning, Some(id)) => format!("Flying to {}", self.name(id)),
            (InteractionState::Transitioning, None) => "Returning".to_string(),
            (InteractionState::Focused, Some(id)) => self.name(id).to_string(),
            (InteractionState::Focused, None) => String::new(),
        };
        dom::set_text(&self.document, "focus-label", &text);
        self.canvas.set_class_name(match state {
            InteractionState::Focused => "focused",
            _ => "",
        });
    }

    fn on_body_hover(&mut self, body: Option<BodyId>) {
        let text = body.map(|id| self.name(id).to_string()).unwrap_or_default();
        dom::set_text(&self.document, "hover-label", &text);
        self.canvas
            .set_class_name(if body.is_some() { "hovering" } else { "" });
    }

    fn on_body_select(&mut self, body: BodyId) {
        log::info!("[overlay] selected {}", self.name(body));
    }
}
