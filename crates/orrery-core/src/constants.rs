use glam::Vec3;

// Shared interaction/camera/quality tuning constants used by both web and native frontends.
// Every value here is the default of a field in `OrreryConfig`.

// Pointer
pub const POINTER_SPEED_SCALE: f32 = 10.0; // amplifies per-sample deltas into a usable range
pub const POINTER_VELOCITY_DECAY: f32 = 0.9; // per tick
pub const POINTER_SPEED_DECAY: f32 = 0.75; // per tick

// Transitions
pub const TRANSITION_SECS: f32 = 1.2;

// Focus framing
pub const FOCUS_FOV_RATIO: f32 = 0.6; // fraction of vertical fov the body should subtend
pub const FOCUS_MARGIN: f32 = 1.3; // keeps the near plane clear of the surface
pub const FOCUS_DIRECTION: [f32; 3] = [0.5, 0.3, 1.0]; // normalized at use
pub const FOCUS_MIN_DISTANCE_RADII: f32 = 1.5;
pub const FOCUS_MAX_DISTANCE_RADII: f32 = 15.0;

// Parallax (per-frame factors)
pub const PARALLAX_INFLUENCE_SMOOTHING: f32 = 0.05;
pub const PARALLAX_EYE_SMOOTHING: f32 = 0.08;
pub const PARALLAX_TARGET_SMOOTHING: f32 = 0.1;
pub const PARALLAX_TARGET_OFFSET_SCALE: f32 = 0.2;
pub const PARALLAX_MIN_DISTANCE_MUL: f32 = 0.7;
pub const PARALLAX_MAX_DISTANCE_MUL: f32 = 1.5;
pub const PARALLAX_MAX_YAW: f32 = 0.5; // radians
pub const PARALLAX_MAX_PITCH: f32 = 0.4; // radians
pub const PARALLAX_PAN_FACTOR: f32 = 0.25; // of focus distance at full influence

// Overview camera
pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 2000.0;
pub const OVERVIEW_EYE: Vec3 = Vec3::new(0.0, 60.0, 140.0);
pub const OVERVIEW_TARGET: Vec3 = Vec3::ZERO;
pub const OVERVIEW_MIN_DISTANCE: f32 = 20.0;
pub const OVERVIEW_MAX_DISTANCE: f32 = 400.0;
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per pixel of drag
pub const ORBIT_ZOOM_SPEED: f32 = 0.001; // per wheel delta unit
pub const ORBIT_MIN_POLAR: f32 = 0.05; // keep away from the poles
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::PI - 0.05;

// Quality
pub const QUALITY_SAMPLE_SIZE: usize = 60;
pub const QUALITY_MIN_DWELL_FRAMES: u32 = 60;
pub const QUALITY_HIGH_FPS: f32 = 55.0;
pub const QUALITY_LOW_FPS: f32 = 30.0;

// Perturbation effect
pub const EFFECT_INTENSITY_SMOOTHING: f32 = 0.15; // new = (1-α)*old + α*speed
pub const EFFECT_INTENSITY_MAX: f32 = 1.0;

// Scene
pub const DEFAULT_SEED: u64 = 42;
