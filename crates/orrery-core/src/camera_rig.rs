//! Camera pose ownership: orbit navigation, scripted transitions and the
//! focused-body parallax view.

use crate::config::{CameraConfig, ParallaxConfig};
use crate::constants::{FOCUS_MAX_DISTANCE_RADII, FOCUS_MIN_DISTANCE_RADII};
use crate::error::{OrreryError, Result};
use crate::orbit::OrbitControls;
use crate::state::Camera;
use crate::tween::{ease_in_out_cubic, Tween, TweenSet};
use glam::{Quat, Vec2, Vec3};

/// Which subsystem currently writes the camera pose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    Orbit,
    Transition,
    Parallax,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Focus,
    Overview,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionComplete {
    pub token: u64,
    pub kind: TransitionKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Channel {
    Eye,
    Target,
}

#[derive(Clone, Copy, Debug)]
struct ActiveTransition {
    token: u64,
    kind: TransitionKind,
    start_time: f32,
    duration: f32,
}

#[derive(Clone, Copy, Debug)]
struct FocusFrame {
    anchor: Vec3,
    // anchor when the focus transition started; the tween follows the drift
    origin: Vec3,
    distance: f32,
    radius: f32,
}

pub struct CameraRig {
    camera: Camera,
    pub orbit: OrbitControls,
    config: CameraConfig,
    parallax: ParallaxConfig,
    mode: CameraMode,
    tweens: TweenSet<Channel>,
    active: Option<ActiveTransition>,
    next_token: u64,
    focus: Option<FocusFrame>,
    parallax_input: Vec2,
    influence: Vec2,
}

impl CameraRig {
    pub fn new(config: CameraConfig, parallax: ParallaxConfig) -> Self {
        let camera = Camera::new(
            config.overview_eye,
            config.overview_target,
            config.fov_radians(),
            config.znear,
            config.zfar,
        );
        Self {
            camera,
            orbit: OrbitControls::new(&config),
            config,
            parallax,
            mode: CameraMode::Orbit,
            tweens: TweenSet::default(),
            active: None,
            next_token: 1,
            focus: None,
            parallax_input: Vec2::ZERO,
            influence: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
    #[inline]
    pub fn mode(&self) -> CameraMode {
        self.mode
    }
    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.active.is_some()
    }
    pub fn active_token(&self) -> Option<u64> {
        self.active.map(|a| a.token)
    }
    #[inline]
    pub fn influence(&self) -> Vec2 {
        self.influence
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.aspect = width.max(1.0) / height.max(1.0);
    }

    /// Distance at which a sphere of `radius` fills the configured fraction of the vertical fov.
    pub fn focus_distance(&self, radius: f32) -> f32 {
        let half = self.config.fov_radians() * self.config.focus_fov_ratio * 0.5;
        radius / half.tan() * self.config.focus_margin
    }

    fn focus_direction(&self) -> Vec3 {
        self.config.focus_direction.try_normalize().unwrap_or(Vec3::Z)
    }

    fn begin(
        &mut self,
        kind: TransitionKind,
        eye: Vec3,
        target: Vec3,
        duration: f32,
        now: f32,
    ) -> u64 {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        self.tweens.cancel_all();
        self.tweens.insert(
            Channel::Eye,
            Tween::new(self.camera.eye, eye, now, duration),
        );
        self.tweens.insert(
            Channel::Target,
            Tween::new(self.camera.target, target, now, duration),
        );
        self.orbit.enabled = false;
        self.orbit.clear_pending();
        self.mode = CameraMode::Transition;
        let token = self.next_token;
        self.next_token += 1;
        if let Some(prev) = self.active.replace(ActiveTransition {
            token,
            kind,
            start_time: now,
            duration,
        }) {
            log::debug!("[camera] transition {} superseded by {}", prev.token, token);
        }
        token
    }

    /// Start a scripted move that frames the sphere at `position`. Any
    /// transition in flight is cancelled. Returns the new transition token.
    pub fn focus_on_body(
        &mut self,
        position: Vec3,
        radius: f32,
        duration: f32,
        now: f32,
    ) -> Result<u64> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(OrreryError::InvalidRadius(radius));
        }
        if !position.is_finite() {
            return Err(OrreryError::InvalidPosition(position));
        }
        let distance = self.focus_distance(radius);
        let eye = position + self.focus_direction() * distance;
        let token = self.begin(TransitionKind::Focus, eye, position, duration, now);
        self.focus = Some(FocusFrame {
            anchor: position,
            origin: position,
            distance,
            radius,
        });
        log::info!("[camera] focus transition {token} r={radius:.2} d={distance:.2}");
        Ok(token)
    }

    /// Start a scripted move back to the default overview pose.
    pub fn return_to_overview(&mut self, duration: f32, now: f32) -> u64 {
        let (eye, target) = (self.config.overview_eye, self.config.overview_target);
        let token = self.begin(TransitionKind::Overview, eye, target, duration, now);
        self.focus = None;
        self.influence = Vec2::ZERO;
        self.parallax_input = Vec2::ZERO;
        log::info!("[camera] overview transition {token}");
        token
    }

    /// Latest device-normalized pointer position; only used in parallax mode.
    pub fn set_parallax_input(&mut self, ndc: Vec2) {
        self.parallax_input = ndc.clamp(Vec2::splat(-1.0), Vec2::ONE);
    }

    /// Follow the focused body as it moves.
    pub fn track_anchor(&mut self, position: Vec3) {
        if let Some(focus) = self.focus.as_mut() {
            focus.anchor = position;
        }
    }

    /// Pointer drag in pixels. Only orbit navigation consumes it.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        if self.mode == CameraMode::Orbit {
            self.orbit.rotate(dx, dy);
        }
    }

    /// Wheel input. In parallax mode it changes the focus distance within the focus bounds.
    pub fn zoom(&mut self, delta: f32) {
        match self.mode {
            CameraMode::Orbit => self.orbit.dolly(delta),
            CameraMode::Parallax => {
                if let Some(focus) = self.focus.as_mut() {
                    if delta.is_finite() {
                        let scaled = focus.distance * (delta * self.config.zoom_speed).exp();
                        focus.distance = scaled.clamp(self.orbit.min_distance, self.orbit.max_distance);
                    }
                }
            }
            CameraMode::Transition => {}
        }
    }

    /// Advance whichever subsystem owns the pose. Returns the completion of
    /// the active transition on the tick its progress reaches 1.
    pub fn update(&mut self, now: f32) -> Option<TransitionComplete> {
        match self.mode {
            CameraMode::Orbit => {
                self.orbit.update(&mut self.camera);
                None
            }
            CameraMode::Parallax => {
                self.parallax_step();
                None
            }
            CameraMode::Transition => self.transition_step(now),
        }
    }

    fn transition_step(&mut self, now: f32) -> Option<TransitionComplete> {
        let active = self.active?;
        let drift = match (active.kind, self.focus) {
            (TransitionKind::Focus, Some(f)) => {
                let p = if active.duration > 0.0 {
                    ((now - active.start_time) / active.duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                (f.anchor - f.origin) * ease_in_out_cubic(p)
            }
            _ => Vec3::ZERO,
        };
        let eye = self.tweens.sample(Channel::Eye, now);
        let target = self.tweens.sample(Channel::Target, now);
        if let Some((eye, _)) = eye {
            self.camera.eye = eye + drift;
        }
        if let Some((target, _)) = target {
            self.camera.look_at(target + drift);
        }
        if !self.tweens.is_empty() {
            return None;
        }

        self.active = None;
        self.orbit.enabled = true;
        self.orbit.sync(self.camera.eye, self.camera.target);
        match active.kind {
            TransitionKind::Focus => {
                self.mode = CameraMode::Parallax;
                self.influence = Vec2::ZERO;
                if let Some(focus) = self.focus {
                    self.orbit.set_bounds(
                        focus.radius * FOCUS_MIN_DISTANCE_RADII,
                        focus.radius * FOCUS_MAX_DISTANCE_RADII,
                    );
                }
            }
            TransitionKind::Overview => {
                self.mode = CameraMode::Orbit;
                self.orbit
                    .set_bounds(self.config.overview_min_distance, self.config.overview_max_distance);
            }
        }
        Some(TransitionComplete {
            token: active.token,
            kind: active.kind,
        })
    }

    fn parallax_step(&mut self) {
        let Some(focus) = self.focus else {
            return;
        };
        let p = self.parallax;
        self.influence += (self.parallax_input - self.influence) * p.influence_smoothing;
        let strength = self.influence.length().min(1.0);
        let distance = focus.distance * (p.min_distance_mul + (p.max_distance_mul - p.min_distance_mul) * strength);

        let base = self.focus_direction();
        let yaw = self.influence.x * p.max_yaw;
        let pitch = self.influence.y * p.max_pitch;
        let side = Vec3::Y.cross(base).try_normalize().unwrap_or(Vec3::X);
        let dir = Quat::from_rotation_y(yaw) * Quat::from_axis_angle(side, -pitch) * base;

        let pan = -(self.camera.right() * self.influence.x + self.camera.up_axis() * self.influence.y)
            * focus.distance
            * p.pan_factor;

        // the multiplier and pan must not push the eye past the focus bounds
        let offset = (dir * distance + pan)
            .clamp_length(self.orbit.min_distance, self.orbit.max_distance);
        let goal_eye = focus.anchor + offset;
        let goal_target = focus.anchor + pan * p.target_offset_scale;
        self.camera.eye = self.camera.eye.lerp(goal_eye, p.eye_smoothing);
        let target = self.camera.target.lerp(goal_target, p.target_smoothing);
        self.camera.look_at(target);
        self.orbit.target = target;
    }
}
