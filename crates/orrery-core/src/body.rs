//! Selectable bodies and the scene-level registry that owns them.

use crate::constants::{EFFECT_INTENSITY_MAX, EFFECT_INTENSITY_SMOOTHING};
use crate::error::{OrreryError, Result};
use crate::picking::PickTarget;
use fnv::FnvHashMap;
use glam::{Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Opaque handle to the renderer's visual for a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BodyKind {
    Star { corona_intensity: f32 },
    Rocky { bump_scale: f32 },
    Ringed { ring_inner: f32, ring_outer: f32, ring_tilt: f32 },
    Layered { cloud_altitude: f32, cloud_opacity: f32 },
}

impl BodyKind {
    pub fn label(&self) -> &'static str {
        match self {
            BodyKind::Star { .. } => "star",
            BodyKind::Rocky { .. } => "rocky",
            BodyKind::Ringed { .. } => "ringed",
            BodyKind::Layered { .. } => "layered",
        }
    }
}

/// Circular path in the XZ plane around the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    /// Radians per second.
    pub angular_speed: f32,
    pub phase: f32,
    pub inclination: f32,
}

impl Orbit {
    pub fn position(&self) -> Vec3 {
        let flat = Vec3::new(self.phase.cos(), 0.0, -self.phase.sin()) * self.radius;
        Quat::from_rotation_x(self.inclination) * flat
    }
}

/// Pointer-driven surface distortion uniforms for one body.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PerturbationEffect {
    pub enabled: bool,
    pub uv: Vec2,
    pub speed: f32,
    pub intensity: f32,
}

impl PerturbationEffect {
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        *self = Self::default();
    }

    /// Feed the latest surface coordinate and pointer speed.
    pub fn drive(&mut self, uv: Option<Vec2>, speed: f32) {
        if !self.enabled {
            return;
        }
        if let Some(uv) = uv {
            self.uv = uv;
        }
        self.speed = speed;
        let blended =
            self.intensity * (1.0 - EFFECT_INTENSITY_SMOOTHING) + speed * EFFECT_INTENSITY_SMOOTHING;
        self.intensity = blended.clamp(0.0, EFFECT_INTENSITY_MAX);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectableBody {
    pub id: BodyId,
    pub name: String,
    pub kind: BodyKind,
    pub radius: f32,
    pub position: Vec3,
    pub spin_angle: f32,
    /// Radians per second about the local Y axis.
    pub spin_speed: f32,
    pub axial_tilt: f32,
    pub orbit: Option<Orbit>,
    pub color: [f32; 3],
    pub texture: Option<String>,
    pub mesh: Option<MeshHandle>,
    pub effect: PerturbationEffect,
}

impl SelectableBody {
    pub fn new(name: impl Into<String>, kind: BodyKind, radius: f32) -> Self {
        Self {
            id: BodyId(0),
            name: name.into(),
            kind,
            radius,
            position: Vec3::ZERO,
            spin_angle: 0.0,
            spin_speed: 0.0,
            axial_tilt: 0.0,
            orbit: None,
            color: [1.0, 1.0, 1.0],
            texture: None,
            mesh: None,
            effect: PerturbationEffect::default(),
        }
    }

    pub fn with_orbit(mut self, orbit: Orbit) -> Self {
        self.position = orbit.position();
        self.orbit = Some(orbit);
        self
    }

    pub fn with_spin(mut self, speed: f32, tilt: f32) -> Self {
        self.spin_speed = speed;
        self.axial_tilt = tilt;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_texture(mut self, key: impl Into<String>) -> Self {
        self.texture = Some(key.into());
        self
    }

    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_z(self.axial_tilt) * Quat::from_rotation_y(self.spin_angle)
    }

    #[inline]
    pub fn is_pickable(&self) -> bool {
        self.mesh.is_some()
    }

    pub fn pick_target(&self) -> Option<PickTarget> {
        self.mesh.map(|_| PickTarget {
            id: self.id,
            center: self.position,
            radius: self.radius,
            orientation: self.orientation(),
            uv_mapped: true,
        })
    }

    fn advance(&mut self, dt: f32, animate_orbits: bool) {
        self.spin_angle = (self.spin_angle + self.spin_speed * dt).rem_euclid(std::f32::consts::TAU);
        if let (true, Some(orbit)) = (animate_orbits, self.orbit.as_mut()) {
            orbit.phase = (orbit.phase + orbit.angular_speed * dt).rem_euclid(std::f32::consts::TAU);
            self.position = orbit.position();
        }
    }
}

/// Owns every body for the lifetime of the scene. Ids are dense indices.
#[derive(Clone, Debug, Default)]
pub struct BodyRegistry {
    bodies: Vec<SelectableBody>,
    by_name: FnvHashMap<String, BodyId>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mut body: SelectableBody) -> Result<BodyId> {
        if self.by_name.contains_key(&body.name) {
            return Err(OrreryError::DuplicateBody(body.name));
        }
        if !body.radius.is_finite() || body.radius <= 0.0 {
            return Err(OrreryError::InvalidBody {
                name: body.name,
                reason: "radius must be positive",
            });
        }
        let id = BodyId(self.bodies.len() as u32);
        body.id = id;
        self.by_name.insert(body.name.clone(), id);
        self.bodies.push(body);
        Ok(id)
    }

    /// Marks a body pickable by attaching its visual.
    pub fn attach_mesh(&mut self, id: BodyId, mesh: MeshHandle) {
        if let Some(body) = self.get_mut(id) {
            body.mesh = Some(mesh);
        }
    }

    #[inline]
    pub fn get(&self, id: BodyId) -> Option<&SelectableBody> {
        self.bodies.get(id.0 as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut SelectableBody> {
        self.bodies.get_mut(id.0 as usize)
    }

    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&SelectableBody> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectableBody> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn pick_targets(&self) -> Vec<PickTarget> {
        self.bodies.iter().filter_map(|b| b.pick_target()).collect()
    }

    pub fn advance(&mut self, dt: f32, animate_orbits: bool) {
        for body in &mut self.bodies {
            body.advance(dt, animate_orbits);
        }
    }

    pub fn effect_mut(&mut self, id: BodyId) -> Option<&mut PerturbationEffect> {
        self.get_mut(id).map(|b| &mut b.effect)
    }
}
