use crate::body::{BodyId, BodyRegistry, MeshHandle};
use crate::camera_rig::CameraRig;
use crate::clock::Clock;
use crate::config::OrreryConfig;
use crate::error::Result;
use crate::interaction::{
    InteractionContext, InteractionController, InteractionListener, InteractionState,
    Notification,
};
use crate::keymap::Command;
use crate::pointer::PointerTracker;
use crate::quality::{QualityController, QualityLevel, QualityPreset};
use crate::renderer::{Renderer, SceneFrame};
use crate::scene::default_solar_system;
use crate::state::Camera;

/// What one tick produced for the front end.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameOutput {
    pub notifications: Vec<Notification>,
    /// Present only on the frame the quality level changed.
    pub quality: Option<QualityPreset>,
}

/// Owns the scene and every interaction subsystem. Front ends feed it input
/// events between frames and call [`Orrery::tick`] or [`Orrery::frame`] once
/// per display frame.
pub struct Orrery {
    config: OrreryConfig,
    bodies: BodyRegistry,
    pointer: PointerTracker,
    rig: CameraRig,
    controller: InteractionController,
    quality: QualityController,
    listeners: Vec<Box<dyn InteractionListener>>,
    pending_quality: Option<QualityPreset>,
    time: f32,
}

macro_rules! ctx {
    ($s:ident) => {
        InteractionContext {
            bodies: &mut $s.bodies,
            rig: &mut $s.rig,
            pointer: &$s.pointer,
        }
    };
}

impl Orrery {
    /// Runtime over the default solar system.
    pub fn new(config: OrreryConfig) -> Result<Self> {
        let bodies = default_solar_system(config.seed)?;
        Ok(Self::with_bodies(config, bodies))
    }

    pub fn with_bodies(config: OrreryConfig, bodies: BodyRegistry) -> Self {
        Self {
            bodies,
            pointer: PointerTracker::new(config.pointer),
            rig: CameraRig::new(config.camera, config.parallax),
            controller: InteractionController::new(config.transition_secs),
            quality: QualityController::new(config.quality),
            listeners: Vec::new(),
            pending_quality: None,
            time: 0.0,
            config,
        }
    }

    /// Marks every body pickable once the renderer has built its visuals.
    pub fn attach_meshes(&mut self) {
        let ids: Vec<BodyId> = self.bodies.iter().map(|b| b.id).collect();
        for id in ids {
            self.bodies.attach_mesh(id, MeshHandle(id.0));
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn InteractionListener>) {
        self.listeners.push(listener);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.pointer.set_viewport(width, height);
        self.rig.resize(width, height);
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer.on_move(x, y);
        self.controller.handle_pointer_move(ctx!(self));
    }

    pub fn on_pointer_click(&mut self, x: f32, y: f32) -> Option<BodyId> {
        self.pointer.on_move(x, y);
        let now = self.time;
        self.controller.handle_click(ctx!(self), now)
    }

    pub fn on_secondary_action(&mut self) -> bool {
        let now = self.time;
        self.controller.handle_return(ctx!(self), now)
    }

    pub fn on_cancel_key(&mut self) -> bool {
        self.on_secondary_action()
    }

    pub fn on_orbit_drag(&mut self, dx: f32, dy: f32) {
        self.rig.drag(dx, dy);
    }

    pub fn on_zoom(&mut self, delta: f32) {
        self.rig.zoom(delta);
    }

    pub fn focus_body(&mut self, name: &str) -> Result<()> {
        let now = self.time;
        self.controller.request_focus(ctx!(self), name, now)
    }

    pub fn set_quality_override(&mut self, level: QualityLevel) {
        if let Some(preset) = self.quality.set_override(level) {
            self.pending_quality = Some(preset);
        }
    }

    pub fn set_auto_quality(&mut self, enabled: bool) {
        self.quality.set_auto(enabled);
    }

    /// Runs a keyboard command. Returns false for commands the core does not
    /// own ([`Command::ToggleHelp`]).
    pub fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::Cancel => {
                if self.on_cancel_key() {
                    log::info!("[keys] returning to overview");
                }
            }
            Command::CycleQuality => {
                let next = self.quality.level().cycled();
                self.set_quality_override(next);
                log::info!("[keys] quality override: {}", next.name());
            }
            Command::ToggleAutoQuality => {
                let auto = !self.quality.is_auto();
                self.set_auto_quality(auto);
                log::info!("[keys] auto quality={}", auto);
            }
            Command::FocusIndex(i) => {
                let name = self.bodies.iter().nth(i).map(|b| b.name.clone());
                if let Some(name) = name {
                    if let Err(e) = self.focus_body(&name) {
                        log::warn!("[keys] cannot focus {}: {}", name, e);
                    }
                }
            }
            Command::ToggleHelp => return false,
        }
        true
    }

    /// Advance everything by one frame of `dt` seconds ending at scene time `now`.
    pub fn tick(&mut self, dt: f32, now: f32) -> FrameOutput {
        self.time = now;
        self.bodies.advance(dt, self.config.animate_orbits);
        self.pointer.decay();
        self.controller.tick(ctx!(self), now);
        if let Some(preset) = self.quality.record_frame(dt) {
            self.pending_quality = Some(preset);
        }

        let notifications = self.controller.take_notifications();
        for n in &notifications {
            for listener in self.listeners.iter_mut() {
                n.dispatch(listener.as_mut());
            }
        }
        FrameOutput {
            notifications,
            quality: self.pending_quality.take(),
        }
    }

    /// One scheduled frame: tick from `clock`, apply any quality change, then draw.
    pub fn frame<C, R>(&mut self, clock: &mut C, renderer: &mut R) -> Result<FrameOutput, R::Error>
    where
        C: Clock,
        R: Renderer,
    {
        let dt = clock.delta_time();
        let now = clock.elapsed_time();
        let out = self.tick(dt, now);
        if let Some(preset) = out.quality.as_ref() {
            renderer.apply_quality(preset);
        }
        renderer.render(&self.scene_frame(), self.rig.camera())?;
        Ok(out)
    }

    pub fn scene_frame(&self) -> SceneFrame<'_> {
        SceneFrame {
            bodies: &self.bodies,
            time: self.time,
            state: self.controller.state(),
            hovered: self.controller.hovered(),
            selected: self.controller.selected(),
        }
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        self.rig.camera()
    }
    #[inline]
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }
    #[inline]
    pub fn bodies(&self) -> &BodyRegistry {
        &self.bodies
    }
    #[inline]
    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }
    #[inline]
    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }
    pub fn state(&self) -> InteractionState {
        self.controller.state()
    }
    pub fn selected(&self) -> Option<BodyId> {
        self.controller.selected()
    }
    pub fn hovered(&self) -> Option<BodyId> {
        self.controller.hovered()
    }
    pub fn quality_preset(&self) -> QualityPreset {
        self.quality.preset()
    }
    pub fn is_auto_quality(&self) -> bool {
        self.quality.is_auto()
    }
    pub fn fps_display(&self) -> String {
        self.quality.fps_display()
    }
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }
}
