mod common;

use common::Harness;
use orrery_core::{
    BodyId, Camera, Command, InteractionListener, InteractionState, ManualClock, Orrery,
    OrreryConfig, QualityLevel, QualityPreset, Renderer, SceneFrame,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Recorder {
    events: Rc<RefCell<Vec<String>>>,
}

impl InteractionListener for Recorder {
    fn on_state_change(&mut self, state: InteractionState, body: Option<BodyId>) {
        self.events
            .borrow_mut()
            .push(format!("state {state:?} {:?}", body.map(|b| b.0)));
    }
    fn on_body_select(&mut self, body: BodyId) {
        self.events.borrow_mut().push(format!("select {}", body.0));
    }
}

#[derive(Default)]
struct CountingRenderer {
    frames: usize,
    presets: Vec<QualityPreset>,
    last_state: Option<InteractionState>,
}

impl Renderer for CountingRenderer {
    type Error = String;

    fn apply_quality(&mut self, preset: &QualityPreset) {
        self.presets.push(*preset);
    }

    fn render(&mut self, scene: &SceneFrame<'_>, _camera: &Camera) -> Result<(), String> {
        self.frames += 1;
        self.last_state = Some(scene.state);
        Ok(())
    }
}

#[test]
fn listeners_receive_notifications_in_order() {
    let mut h = Harness::new();
    let events = Rc::new(RefCell::new(Vec::new()));
    h.orrery.add_listener(Box::new(Recorder {
        events: events.clone(),
    }));
    h.orrery.focus_body("beta").unwrap();
    h.run(1.5);
    assert_eq!(
        *events.borrow(),
        vec![
            "state Transitioning Some(1)".to_string(),
            "state Focused Some(1)".to_string(),
            "select 1".to_string(),
        ]
    );
}

#[test]
fn frame_drives_renderer_and_quality() {
    let config = OrreryConfig {
        animate_orbits: false,
        ..OrreryConfig::default()
    };
    let mut orrery = Orrery::with_bodies(config, common::still_scene());
    let mut clock = ManualClock::new(1.0 / 10.0);
    let mut renderer = CountingRenderer::default();

    for _ in 0..130 {
        orrery.frame(&mut clock, &mut renderer).unwrap();
    }
    assert_eq!(renderer.frames, 130);
    assert_eq!(renderer.presets.len(), 1);
    assert_eq!(renderer.presets[0].level, QualityLevel::Low);
    assert_eq!(renderer.last_state, Some(InteractionState::Overview));
    assert_eq!(orrery.fps_display(), "10 FPS");
    assert!((orrery.time() - 13.0).abs() < 1e-3);
}

#[test]
fn quality_override_is_delivered_once() {
    let mut h = Harness::new();
    h.orrery.set_quality_override(QualityLevel::Medium);
    assert!(!h.orrery.is_auto_quality());
    let first = h.orrery.tick(common::DT, 0.1);
    assert_eq!(first.quality.map(|p| p.level), Some(QualityLevel::Medium));
    let second = h.orrery.tick(common::DT, 0.2);
    assert!(second.quality.is_none());
    assert_eq!(h.orrery.quality_preset().level, QualityLevel::Medium);
}

#[test]
fn default_scene_runtime_is_deterministic() {
    let a = Orrery::new(OrreryConfig::default()).unwrap();
    let b = Orrery::new(OrreryConfig::default()).unwrap();
    let pos = |o: &Orrery| o.bodies().by_name("earth").unwrap().position;
    assert_eq!(pos(&a), pos(&b));
    assert_eq!(a.bodies().len(), 9);
}

#[test]
fn orbit_drag_moves_overview_camera() {
    let mut h = Harness::new();
    let eye = h.orrery.camera().eye;
    h.orrery.on_orbit_drag(120.0, 0.0);
    h.orrery.on_zoom(200.0);
    h.run(1.0);
    let moved = h.orrery.camera().eye;
    assert!((moved - eye).length() > 1.0);
    assert!(moved.length() > eye.length());
}

#[test]
fn key_commands_drive_the_runtime() {
    let mut h = Harness::new();
    let beta = h.id("beta");

    assert!(h.orrery.apply_command(Command::FocusIndex(1)));
    assert_eq!(h.orrery.selected(), Some(beta));
    assert!(h.orrery.apply_command(Command::FocusIndex(7)));
    assert_eq!(h.orrery.selected(), Some(beta));
    h.run(2.0);
    assert_eq!(h.orrery.state(), InteractionState::Focused);

    assert!(h.orrery.apply_command(Command::Cancel));
    h.run(2.0);
    assert_eq!(h.orrery.state(), InteractionState::Overview);

    assert!(h.orrery.apply_command(Command::CycleQuality));
    assert!(!h.orrery.is_auto_quality());
    assert_eq!(h.orrery.quality_preset().level, QualityLevel::Medium);
    assert!(h.orrery.apply_command(Command::ToggleAutoQuality));
    assert!(h.orrery.is_auto_quality());

    assert!(!h.orrery.apply_command(Command::ToggleHelp));
}
