//! Selection and focus state machine.
//!
//! Overview -> Transitioning -> Focused -> Transitioning -> Overview. The
//! selected body is tracked only while moving toward or sitting in focus;
//! the hovered body only while in overview.

use crate::body::{BodyId, BodyRegistry};
use crate::camera_rig::{CameraRig, TransitionComplete, TransitionKind};
use crate::error::{OrreryError, Result};
use crate::picking::{pick_at, SurfaceProbe};
use crate::pointer::PointerTracker;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionState {
    Overview,
    Transitioning,
    Focused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Overview,
    ToFocus { body: BodyId, token: u64 },
    Focused { body: BodyId },
    ToOverview { token: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    StateChanged {
        state: InteractionState,
        body: Option<BodyId>,
    },
    BodyHovered(Option<BodyId>),
    BodySelected(BodyId),
}

/// Observer for interaction changes. Every method defaults to a no-op.
pub trait InteractionListener {
    fn on_state_change(&mut self, _state: InteractionState, _body: Option<BodyId>) {}
    fn on_body_hover(&mut self, _body: Option<BodyId>) {}
    fn on_body_select(&mut self, _body: BodyId) {}
}

impl Notification {
    pub fn dispatch(&self, listener: &mut dyn InteractionListener) {
        match *self {
            Notification::StateChanged { state, body } => listener.on_state_change(state, body),
            Notification::BodyHovered(body) => listener.on_body_hover(body),
            Notification::BodySelected(body) => listener.on_body_select(body),
        }
    }
}

/// The collaborators the controller drives on each event.
pub struct InteractionContext<'a> {
    pub bodies: &'a mut BodyRegistry,
    pub rig: &'a mut CameraRig,
    pub pointer: &'a PointerTracker,
}

pub struct InteractionController {
    phase: Phase,
    hovered: Option<BodyId>,
    probe: SurfaceProbe,
    transition_secs: f32,
    pending: Vec<Notification>,
}

impl InteractionController {
    pub fn new(transition_secs: f32) -> Self {
        Self {
            phase: Phase::Overview,
            hovered: None,
            probe: SurfaceProbe::default(),
            transition_secs,
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> InteractionState {
        match self.phase {
            Phase::Overview => InteractionState::Overview,
            Phase::ToFocus { .. } | Phase::ToOverview { .. } => InteractionState::Transitioning,
            Phase::Focused { .. } => InteractionState::Focused,
        }
    }

    pub fn selected(&self) -> Option<BodyId> {
        match self.phase {
            Phase::ToFocus { body, .. } | Phase::Focused { body } => Some(body),
            Phase::Overview | Phase::ToOverview { .. } => None,
        }
    }

    #[inline]
    pub fn hovered(&self) -> Option<BodyId> {
        self.hovered
    }

    /// Drains queued notifications in emission order.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    fn emit(&mut self, n: Notification) {
        log::debug!("[interaction] {n:?}");
        self.pending.push(n);
    }

    fn set_hover(&mut self, body: Option<BodyId>) {
        if self.hovered != body {
            self.hovered = body;
            self.emit(Notification::BodyHovered(body));
        }
    }

    /// Call after the pointer tracker has taken the new sample.
    pub fn handle_pointer_move(&mut self, ctx: InteractionContext<'_>) {
        match self.phase {
            Phase::Overview => {
                let targets = ctx.bodies.pick_targets();
                let hit = pick_at(ctx.rig.camera(), ctx.pointer.ndc(), &targets);
                self.set_hover(hit.map(|h| h.id));
            }
            Phase::Focused { body } => {
                ctx.rig.set_parallax_input(ctx.pointer.ndc());
                let target = ctx.bodies.get(body).and_then(|b| b.pick_target());
                let hit = pick_at(ctx.rig.camera(), ctx.pointer.ndc(), target.iter());
                let uv = self.probe.observe(hit.as_ref());
                if let Some(fx) = ctx.bodies.effect_mut(body) {
                    fx.drive(uv, ctx.pointer.speed());
                }
            }
            Phase::ToFocus { .. } | Phase::ToOverview { .. } => {}
        }
    }

    /// Primary click. Selects the body under the pointer while in overview.
    pub fn handle_click(&mut self, ctx: InteractionContext<'_>, now: f32) -> Option<BodyId> {
        if self.phase != Phase::Overview {
            return None;
        }
        let targets = ctx.bodies.pick_targets();
        let hit = pick_at(ctx.rig.camera(), ctx.pointer.ndc(), &targets)?;
        match self.begin_focus(ctx, hit.id, now) {
            Ok(()) => Some(hit.id),
            Err(err) => {
                log::warn!("[interaction] click ignored: {err}");
                None
            }
        }
    }

    /// Focus a body by name from any state.
    pub fn request_focus(&mut self, ctx: InteractionContext<'_>, name: &str, now: f32) -> Result<()> {
        let Some(id) = ctx.bodies.id_of(name) else {
            log::warn!("[interaction] focus request for unknown body `{name}`");
            return Err(OrreryError::UnknownBody(name.to_string()));
        };
        match self.phase {
            Phase::Focused { body } | Phase::ToFocus { body, .. } if body == id => return Ok(()),
            _ => {}
        }
        self.begin_focus(ctx, id, now)
    }

    fn begin_focus(&mut self, ctx: InteractionContext<'_>, id: BodyId, now: f32) -> Result<()> {
        let body = ctx
            .bodies
            .get(id)
            .ok_or_else(|| OrreryError::UnknownBody(format!("#{}", id.0)))?;
        if !body.is_pickable() {
            log::warn!("[interaction] `{}` has no visual yet", body.name);
            return Err(OrreryError::InvalidBody {
                name: body.name.clone(),
                reason: "visual not loaded",
            });
        }
        let token = ctx
            .rig
            .focus_on_body(body.position, body.radius, self.transition_secs, now)
            .map_err(|_| OrreryError::InvalidBody {
                name: body.name.clone(),
                reason: "radius must be positive and finite",
            })?;
        log::info!("[interaction] focusing `{}` (transition {token})", body.name);

        if self.phase == Phase::Overview {
            self.set_hover(None);
        }
        if let Some(prev) = self.selected().filter(|prev| *prev != id) {
            if let Some(fx) = ctx.bodies.effect_mut(prev) {
                fx.disable();
            }
        }
        if let Some(fx) = ctx.bodies.effect_mut(id) {
            fx.enable();
        }
        self.probe.reset();
        self.phase = Phase::ToFocus { body: id, token };
        self.emit(Notification::StateChanged {
            state: InteractionState::Transitioning,
            body: Some(id),
        });
        Ok(())
    }

    /// Secondary action or cancel key. Returns true when a return transition started.
    pub fn handle_return(&mut self, ctx: InteractionContext<'_>, now: f32) -> bool {
        let Some(body) = self.selected() else {
            return false;
        };
        if let Some(fx) = ctx.bodies.effect_mut(body) {
            fx.disable();
        }
        self.probe.reset();
        let token = ctx.rig.return_to_overview(self.transition_secs, now);
        self.phase = Phase::ToOverview { token };
        self.emit(Notification::StateChanged {
            state: InteractionState::Transitioning,
            body: None,
        });
        true
    }

    /// Per-frame step: keeps the camera on the selected body, advances the
    /// rig and applies its completion.
    pub fn tick(&mut self, ctx: InteractionContext<'_>, now: f32) {
        if let Some(body) = self.selected().and_then(|id| ctx.bodies.get(id)) {
            ctx.rig.track_anchor(body.position);
        }
        if let Phase::Focused { body } = self.phase {
            let uv = self.probe.last_uv();
            if let Some(fx) = ctx.bodies.effect_mut(body) {
                fx.drive(uv, ctx.pointer.speed());
            }
        }
        if let Some(done) = ctx.rig.update(now) {
            self.complete(done);
        }
    }

    fn complete(&mut self, done: TransitionComplete) {
        match (self.phase, done.kind) {
            (Phase::ToFocus { body, token }, TransitionKind::Focus) if token == done.token => {
                self.phase = Phase::Focused { body };
                self.emit(Notification::StateChanged {
                    state: InteractionState::Focused,
                    body: Some(body),
                });
                self.emit(Notification::BodySelected(body));
            }
            (Phase::ToOverview { token }, TransitionKind::Overview) if token == done.token => {
                self.phase = Phase::Overview;
                self.emit(Notification::StateChanged {
                    state: InteractionState::Overview,
                    body: None,
                });
            }
            _ => log::debug!("[interaction] discarding stale completion {}", done.token),
        }
    }
}
