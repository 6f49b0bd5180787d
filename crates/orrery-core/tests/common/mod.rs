#![allow(dead_code)]

use glam::Vec3;
use orrery_core::{
    BodyId, BodyKind, BodyRegistry, InteractionState, Notification, Orrery, OrreryConfig,
    SelectableBody,
};

pub const WIDTH: f32 = 800.0;
pub const HEIGHT: f32 = 600.0;
pub const DT: f32 = 1.0 / 60.0;

/// Two still bodies left and right of the sun, nothing animating.
pub fn still_scene() -> BodyRegistry {
    let mut reg = BodyRegistry::new();
    reg.insert(
        SelectableBody::new("alpha", BodyKind::Rocky { bump_scale: 0.1 }, 3.0)
            .with_spin(0.3, 0.0),
    )
    .unwrap();
    reg.insert(SelectableBody::new(
        "beta",
        BodyKind::Layered {
            cloud_altitude: 0.02,
            cloud_opacity: 0.5,
        },
        4.0,
    ))
    .unwrap();
    reg.get_mut(BodyId(0)).unwrap().position = Vec3::new(-30.0, 0.0, 0.0);
    reg.get_mut(BodyId(1)).unwrap().position = Vec3::new(30.0, 0.0, 0.0);
    reg
}

pub struct Harness {
    pub orrery: Orrery,
    pub now: f32,
    pub log: Vec<Notification>,
}

impl Harness {
    pub fn new() -> Self {
        let config = OrreryConfig {
            animate_orbits: false,
            ..OrreryConfig::default()
        };
        let mut orrery = Orrery::with_bodies(config, still_scene());
        orrery.resize(WIDTH, HEIGHT);
        orrery.attach_meshes();
        Self {
            orrery,
            now: 0.0,
            log: Vec::new(),
        }
    }

    pub fn tick(&mut self) -> Vec<Notification> {
        self.now += DT;
        let out = self.orrery.tick(DT, self.now);
        self.log.extend(out.notifications.iter().copied());
        assert_invariants(&self.orrery);
        out.notifications
    }

    pub fn run(&mut self, secs: f32) -> Vec<Notification> {
        let mut all = Vec::new();
        let frames = (secs / DT).ceil() as usize;
        for _ in 0..frames {
            all.extend(self.tick());
        }
        all
    }

    /// Pixel position of a body's centre under the current camera.
    pub fn screen_of(&self, name: &str) -> (f32, f32) {
        let body = self.orrery.bodies().by_name(name).unwrap();
        let clip = self.orrery.camera().view_proj() * body.position.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        ((ndc.x + 1.0) * 0.5 * WIDTH, (1.0 - ndc.y) * 0.5 * HEIGHT)
    }

    pub fn id(&self, name: &str) -> BodyId {
        self.orrery.bodies().id_of(name).unwrap()
    }
}

pub fn assert_invariants(orrery: &Orrery) {
    match orrery.state() {
        InteractionState::Overview => assert!(orrery.selected().is_none()),
        InteractionState::Focused => assert!(orrery.selected().is_some()),
        InteractionState::Transitioning => {}
    }
    if orrery.hovered().is_some() {
        assert_eq!(orrery.state(), InteractionState::Overview);
    }
    let enabled: Vec<_> = orrery
        .bodies()
        .iter()
        .filter(|b| b.effect.enabled)
        .map(|b| b.id)
        .collect();
    match orrery.selected() {
        Some(id) => assert_eq!(enabled, vec![id]),
        None => assert!(enabled.is_empty()),
    }
}
