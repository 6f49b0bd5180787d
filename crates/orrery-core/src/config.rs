//! Runtime configuration.
//!
//! Every tuning value defaults to the matching constant in `constants.rs`.
//! Overrides are read through a key lookup so the same parser serves
//! environment variables on native and the page query string on the web.

use crate::constants::*;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerConfig {
    pub speed_scale: f32,
    pub velocity_decay: f32,
    pub speed_decay: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            speed_scale: POINTER_SPEED_SCALE,
            velocity_decay: POINTER_VELOCITY_DECAY,
            speed_decay: POINTER_SPEED_DECAY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub overview_eye: Vec3,
    pub overview_target: Vec3,
    pub overview_min_distance: f32,
    pub overview_max_distance: f32,
    pub focus_fov_ratio: f32,
    pub focus_margin: f32,
    pub focus_direction: Vec3,
    pub orbit_damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl CameraConfig {
    #[inline]
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_FOV_DEGREES,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            overview_eye: OVERVIEW_EYE,
            overview_target: OVERVIEW_TARGET,
            overview_min_distance: OVERVIEW_MIN_DISTANCE,
            overview_max_distance: OVERVIEW_MAX_DISTANCE,
            focus_fov_ratio: FOCUS_FOV_RATIO,
            focus_margin: FOCUS_MARGIN,
            focus_direction: Vec3::from(FOCUS_DIRECTION),
            orbit_damping: ORBIT_DAMPING,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
        }
    }
}

/// Mouse-parallax tuning. The smoothing factors are applied once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxConfig {
    pub influence_smoothing: f32,
    pub eye_smoothing: f32,
    pub target_smoothing: f32,
    pub target_offset_scale: f32,
    pub min_distance_mul: f32,
    pub max_distance_mul: f32,
    pub max_yaw: f32,
    pub max_pitch: f32,
    pub pan_factor: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            influence_smoothing: PARALLAX_INFLUENCE_SMOOTHING,
            eye_smoothing: PARALLAX_EYE_SMOOTHING,
            target_smoothing: PARALLAX_TARGET_SMOOTHING,
            target_offset_scale: PARALLAX_TARGET_OFFSET_SCALE,
            min_distance_mul: PARALLAX_MIN_DISTANCE_MUL,
            max_distance_mul: PARALLAX_MAX_DISTANCE_MUL,
            max_yaw: PARALLAX_MAX_YAW,
            max_pitch: PARALLAX_MAX_PITCH,
            pan_factor: PARALLAX_PAN_FACTOR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityConfig {
    pub sample_size: usize,
    pub min_dwell_frames: u32,
    pub high_fps: f32,
    pub low_fps: f32,
    pub auto: bool,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            sample_size: QUALITY_SAMPLE_SIZE,
            min_dwell_frames: QUALITY_MIN_DWELL_FRAMES,
            high_fps: QUALITY_HIGH_FPS,
            low_fps: QUALITY_LOW_FPS,
            auto: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrreryConfig {
    pub pointer: PointerConfig,
    pub camera: CameraConfig,
    pub parallax: ParallaxConfig,
    pub quality: QualityConfig,
    pub transition_secs: f32,
    pub animate_orbits: bool,
    pub seed: u64,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            pointer: PointerConfig::default(),
            camera: CameraConfig::default(),
            parallax: ParallaxConfig::default(),
            quality: QualityConfig::default(),
            transition_secs: TRANSITION_SECS,
            animate_orbits: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl OrreryConfig {
    /// Defaults overridden by `ORRERY_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each known key.
    ///
    /// Values that fail to parse, are non-finite or fall outside their valid
    /// range are ignored with a warning and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse_f32(&lookup, "ORRERY_POINTER_SPEED_SCALE", |v| v > 0.0) {
            config.pointer.speed_scale = v;
        }
        if let Some(v) = parse_f32(&lookup, "ORRERY_POINTER_SPEED_DECAY", unit_open) {
            config.pointer.speed_decay = v;
        }
        if let Some(v) = parse_f32(&lookup, "ORRERY_POINTER_VELOCITY_DECAY", unit_open) {
            config.pointer.velocity_decay = v;
        }

        if let Some(v) = parse_f32(&lookup, "ORRERY_FOV_DEGREES", |v| v > 1.0 && v < 179.0) {
            config.camera.fov_degrees = v;
        }
        if let Some(v) = parse_f32(&lookup, "ORRERY_FOCUS_FOV_RATIO", |v| v > 0.0 && v < 1.0) {
            config.camera.focus_fov_ratio = v;
        }
        if let Some(v) = parse_f32(&lookup, "ORRERY_ORBIT_DAMPING", unit_open) {
            config.camera.orbit_damping = v;
        }

        if let Some(v) = parse_f32(&lookup, "ORRERY_PARALLAX_INFLUENCE_SMOOTHING", unit_open) {
            config.parallax.influence_smoothing = v;
        }
        if let Some(v) = parse_f32(&lookup, "ORRERY_PARALLAX_EYE_SMOOTHING", unit_open) {
            config.parallax.eye_smoothing = v;
        }
        if let Some(v) = parse_f32(&lookup, "ORRERY_PARALLAX_TARGET_SMOOTHING", unit_open) {
            config.parallax.target_smoothing = v;
        }
        if let Some(v) = parse_f32(&lookup, "ORRERY_PARALLAX_PAN_FACTOR", |v| v >= 0.0) {
            config.parallax.pan_factor = v;
        }

        if let Some(v) = parse_usize(&lookup, "ORRERY_QUALITY_SAMPLE_SIZE") {
            config.quality.sample_size = v;
        }
        if let Some(v) = parse_usize(&lookup, "ORRERY_QUALITY_DWELL_FRAMES") {
            config.quality.min_dwell_frames = v as u32;
        }
        if let Some(v) = parse_bool(&lookup, "ORRERY_QUALITY_AUTO") {
            config.quality.auto = v;
        }

        if let Some(v) = parse_f32(&lookup, "ORRERY_TRANSITION_SECS", |v| v > 0.0) {
            config.transition_secs = v;
        }
        if let Some(v) = parse_bool(&lookup, "ORRERY_ANIMATE_ORBITS") {
            config.animate_orbits = v;
        }
        if let Some(raw) = lookup("ORRERY_SEED") {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.seed = seed,
                Err(_) => log::warn!("[config] ignoring ORRERY_SEED={raw:?}"),
            }
        }

        config
    }
}

#[inline]
fn unit_open(v: f32) -> bool {
    v > 0.0 && v < 1.0
}

fn parse_f32<F>(lookup: &F, key: &str, valid: impl Fn(f32) -> bool) -> Option<f32>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() && valid(v) => Some(v),
        _ => {
            log::warn!("[config] ignoring {key}={raw:?}");
            None
        }
    }
}

fn parse_usize<F>(lookup: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<usize>() {
        Ok(v) if v > 0 => Some(v),
        _ => {
            log::warn!("[config] ignoring {key}={raw:?}");
            None
        }
    }
}

fn parse_bool<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            log::warn!("[config] ignoring {key}={raw:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_keeps_defaults() {
        let config = OrreryConfig::from_lookup(|_| None);
        assert_eq!(config, OrreryConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = OrreryConfig::from_lookup(lookup_from(&[
            ("ORRERY_PARALLAX_EYE_SMOOTHING", "0.2"),
            ("ORRERY_QUALITY_AUTO", "off"),
            ("ORRERY_TRANSITION_SECS", "0.5"),
            ("ORRERY_SEED", "7"),
        ]));
        assert!((config.parallax.eye_smoothing - 0.2).abs() < 1e-6);
        assert!(!config.quality.auto);
        assert!((config.transition_secs - 0.5).abs() < 1e-6);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn invalid_values_are_ignored() {
        let config = OrreryConfig::from_lookup(lookup_from(&[
            ("ORRERY_PARALLAX_EYE_SMOOTHING", "1.5"),
            ("ORRERY_FOV_DEGREES", "NaN"),
            ("ORRERY_QUALITY_SAMPLE_SIZE", "0"),
            ("ORRERY_ANIMATE_ORBITS", "maybe"),
        ]));
        let defaults = OrreryConfig::default();
        assert_eq!(config.parallax.eye_smoothing, defaults.parallax.eye_smoothing);
        assert_eq!(config.camera.fov_degrees, defaults.camera.fov_degrees);
        assert_eq!(config.quality.sample_size, defaults.quality.sample_size);
        assert_eq!(config.animate_orbits, defaults.animate_orbits);
    }
}
