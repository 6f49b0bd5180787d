use crate::body::{BodyId, BodyRegistry};
use crate::interaction::InteractionState;
use crate::quality::QualityPreset;
use crate::state::Camera;

/// Read-only view of the scene handed to a renderer each frame.
pub struct SceneFrame<'a> {
    pub bodies: &'a BodyRegistry,
    pub time: f32,
    pub state: InteractionState,
    pub hovered: Option<BodyId>,
    pub selected: Option<BodyId>,
}

/// Drawing backend. The front ends implement this over wgpu.
pub trait Renderer {
    type Error: std::fmt::Display;

    fn apply_quality(&mut self, preset: &QualityPreset);

    fn render(&mut self, scene: &SceneFrame<'_>, camera: &Camera) -> Result<(), Self::Error>;
}
