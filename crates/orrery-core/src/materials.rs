//! Material lookup for body kinds.
//!
//! Shader programs are opaque to the core. A material is a shader kind plus
//! a list of named uniforms and an optional texture handle resolved through
//! an [`AssetProvider`].

use crate::body::{BodyKind, SelectableBody};
use fnv::FnvHashMap;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Corona,
    Rocky,
    Ringed,
    Layered,
}

impl ShaderKind {
    pub fn for_body(kind: &BodyKind) -> Self {
        match kind {
            BodyKind::Star { .. } => ShaderKind::Corona,
            BodyKind::Rocky { .. } => ShaderKind::Rocky,
            BodyKind::Ringed { .. } => ShaderKind::Ringed,
            BodyKind::Layered { .. } => ShaderKind::Layered,
        }
    }

    /// Index the bundled body shader switches on.
    pub fn index(self) -> u32 {
        match self {
            ShaderKind::Corona => 0,
            ShaderKind::Rocky => 1,
            ShaderKind::Ringed => 2,
            ShaderKind::Layered => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Bool(bool),
}

pub type Uniforms = SmallVec<[(&'static str, UniformValue); 10]>;

/// Resolves texture keys to renderer-specific handles.
pub trait AssetProvider {
    type Handle: Copy;

    fn get_texture(&self, key: &str) -> Option<Self::Handle>;
}

/// Hash-map backed provider. Missing keys are logged once per lookup.
#[derive(Clone, Debug)]
pub struct TextureLibrary<H> {
    textures: FnvHashMap<String, H>,
}

impl<H> Default for TextureLibrary<H> {
    fn default() -> Self {
        Self {
            textures: FnvHashMap::default(),
        }
    }
}

impl<H: Copy> TextureLibrary<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, handle: H) {
        self.textures.insert(key.into(), handle);
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl<H: Copy> AssetProvider for TextureLibrary<H> {
    type Handle = H;

    fn get_texture(&self, key: &str) -> Option<H> {
        let found = self.textures.get(key).copied();
        if found.is_none() {
            log::warn!("[assets] missing texture `{key}`, falling back to untextured");
        }
        found
    }
}

#[derive(Clone, Debug)]
pub struct Material<H> {
    pub shader: ShaderKind,
    pub uniforms: Uniforms,
    pub texture: Option<H>,
}

impl<H> Material<H> {
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }
}

/// Material for `body` at scene time `time`.
pub fn material_for<P: AssetProvider>(
    body: &SelectableBody,
    time: f32,
    assets: &P,
) -> Material<P::Handle> {
    let fx = &body.effect;
    let mut uniforms: Uniforms = SmallVec::new();
    uniforms.push(("u_time", UniformValue::Float(time)));
    uniforms.push(("u_color", UniformValue::Vec3(body.color)));
    uniforms.push(("u_effect_enabled", UniformValue::Bool(fx.enabled)));
    uniforms.push(("u_mouse_uv", UniformValue::Vec2(fx.uv.to_array())));
    uniforms.push(("u_mouse_speed", UniformValue::Float(fx.speed)));
    uniforms.push(("u_effect_intensity", UniformValue::Float(fx.intensity)));
    match body.kind {
        BodyKind::Star { corona_intensity } => {
            uniforms.push(("u_corona_intensity", UniformValue::Float(corona_intensity)));
        }
        BodyKind::Rocky { bump_scale } => {
            uniforms.push(("u_bump_scale", UniformValue::Float(bump_scale)));
        }
        BodyKind::Ringed {
            ring_inner,
            ring_outer,
            ring_tilt,
        } => {
            uniforms.push(("u_ring_inner", UniformValue::Float(ring_inner)));
            uniforms.push(("u_ring_outer", UniformValue::Float(ring_outer)));
            uniforms.push(("u_ring_tilt", UniformValue::Float(ring_tilt)));
        }
        BodyKind::Layered {
            cloud_altitude,
            cloud_opacity,
        } => {
            uniforms.push(("u_cloud_altitude", UniformValue::Float(cloud_altitude)));
            uniforms.push(("u_cloud_opacity", UniformValue::Float(cloud_opacity)));
        }
    }
    let texture = body.texture.as_deref().and_then(|key| assets.get_texture(key));
    Material {
        shader: ShaderKind::for_body(&body.kind),
        uniforms,
        texture,
    }
}

/// Packed per-body record for instanced GPU upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 3],
    pub shader: u32,
    /// Kind-specific parameters, see [`BodyInstance::from_body`].
    pub params: [f32; 4],
    pub mouse_uv: [f32; 2],
    pub mouse_speed: f32,
    pub effect_intensity: f32,
    pub spin: f32,
    pub highlight: f32,
    pub texture: u32,
    pub effect_enabled: u32,
}

impl BodyInstance {
    pub const NO_TEXTURE: u32 = u32::MAX;

    pub fn from_body(body: &SelectableBody, texture: Option<u32>, highlight: f32) -> Self {
        let params = match body.kind {
            BodyKind::Star { corona_intensity } => [corona_intensity, 0.0, 0.0, 0.0],
            BodyKind::Rocky { bump_scale } => [bump_scale, 0.0, 0.0, 0.0],
            BodyKind::Ringed {
                ring_inner,
                ring_outer,
                ring_tilt,
            } => [ring_inner, ring_outer, ring_tilt, 0.0],
            BodyKind::Layered {
                cloud_altitude,
                cloud_opacity,
            } => [cloud_altitude, cloud_opacity, 0.0, 0.0],
        };
        let fx = &body.effect;
        Self {
            position: body.position.to_array(),
            radius: body.radius,
            color: body.color,
            shader: ShaderKind::for_body(&body.kind).index(),
            params,
            mouse_uv: fx.uv.to_array(),
            mouse_speed: fx.speed,
            effect_intensity: fx.intensity,
            spin: body.spin_angle,
            highlight,
            texture: texture.unwrap_or(Self::NO_TEXTURE),
            effect_enabled: fx.enabled as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::SelectableBody;

    #[test]
    fn kind_selects_shader_and_extra_uniforms() {
        let body = SelectableBody::new(
            "saturn",
            BodyKind::Ringed {
                ring_inner: 1.2,
                ring_outer: 2.0,
                ring_tilt: 0.4,
            },
            3.0,
        );
        let lib: TextureLibrary<u32> = TextureLibrary::new();
        let mat = material_for(&body, 1.5, &lib);
        assert_eq!(mat.shader, ShaderKind::Ringed);
        assert_eq!(mat.uniform("u_time"), Some(UniformValue::Float(1.5)));
        assert_eq!(mat.uniform("u_ring_outer"), Some(UniformValue::Float(2.0)));
        assert!(mat.uniform("u_cloud_opacity").is_none());
    }

    #[test]
    fn missing_texture_falls_back_to_untextured() {
        let mut lib = TextureLibrary::new();
        lib.insert("earth", 3u32);
        let earth = SelectableBody::new("earth", BodyKind::Rocky { bump_scale: 0.0 }, 1.0)
            .with_texture("earth");
        let mars = SelectableBody::new("mars", BodyKind::Rocky { bump_scale: 0.0 }, 1.0)
            .with_texture("mars");
        assert_eq!(material_for(&earth, 0.0, &lib).texture, Some(3));
        assert_eq!(material_for(&mars, 0.0, &lib).texture, None);
    }

    #[test]
    fn instance_layout_is_packed() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), 80);
        let body = SelectableBody::new("x", BodyKind::Star { corona_intensity: 2.0 }, 4.0);
        let inst = BodyInstance::from_body(&body, None, 0.0);
        assert_eq!(inst.texture, BodyInstance::NO_TEXTURE);
        assert_eq!(inst.params[0], 2.0);
        assert_eq!(bytemuck::bytes_of(&inst).len(), 80);
    }
}
