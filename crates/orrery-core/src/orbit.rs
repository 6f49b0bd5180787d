//! Damped orbit navigation around a target point.

use crate::config::CameraConfig;
use crate::constants::{ORBIT_MAX_POLAR, ORBIT_MIN_POLAR};
use crate::state::Camera;
use glam::Vec3;

/// Spherical navigation state. Pending rotate/zoom input is consumed by a
/// fraction `damping` each update, so motion eases out after input stops.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enabled: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    damping: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    radius: f32,
    // azimuth around +Y, measured from +Z
    theta: f32,
    // polar angle from +Y
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_log_scale: f32,
}

impl OrbitControls {
    pub fn new(config: &CameraConfig) -> Self {
        let mut controls = Self {
            target: config.overview_target,
            enabled: true,
            min_distance: config.overview_min_distance,
            max_distance: config.overview_max_distance,
            damping: config.orbit_damping,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            radius: 1.0,
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_log_scale: 0.0,
        };
        controls.sync(config.overview_eye, config.overview_target);
        controls
    }

    /// Re-derive the spherical state from an externally set pose and drop pending input.
    pub fn sync(&mut self, eye: Vec3, target: Vec3) {
        self.target = target;
        let offset = eye - target;
        self.radius = offset.length().max(1e-4);
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        self.clear_pending();
    }

    pub fn clear_pending(&mut self) {
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_log_scale = 0.0;
    }

    /// Pointer drag in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        if !self.enabled {
            return;
        }
        self.pending_theta -= dx * self.rotate_speed;
        self.pending_phi -= dy * self.rotate_speed;
    }

    /// Wheel delta; positive moves away from the target.
    pub fn dolly(&mut self, delta: f32) {
        if !self.enabled || !delta.is_finite() {
            return;
        }
        self.pending_log_scale += delta * self.zoom_speed;
    }

    pub fn set_bounds(&mut self, min_distance: f32, max_distance: f32) {
        self.min_distance = min_distance;
        self.max_distance = max_distance.max(min_distance);
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn has_pending(&self) -> bool {
        self.pending_theta.abs() > 1e-6
            || self.pending_phi.abs() > 1e-6
            || self.pending_log_scale.abs() > 1e-6
    }

    /// Applies one step of damped input and writes the resulting pose into `camera`.
    pub fn update(&mut self, camera: &mut Camera) {
        if !self.enabled {
            return;
        }
        let d = self.damping;
        self.theta += self.pending_theta * d;
        self.phi = (self.phi + self.pending_phi * d).clamp(ORBIT_MIN_POLAR, ORBIT_MAX_POLAR);
        self.radius *= (self.pending_log_scale * d).exp();
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);

        self.pending_theta *= 1.0 - d;
        self.pending_phi *= 1.0 - d;
        self.pending_log_scale *= 1.0 - d;

        let sin_phi = self.phi.sin();
        let offset = Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        );
        camera.eye = self.target + offset;
        camera.look_at(self.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (OrbitControls, Camera) {
        let config = CameraConfig::default();
        let cam = Camera::new(
            config.overview_eye,
            config.overview_target,
            config.fov_radians(),
            config.znear,
            config.zfar,
        );
        (OrbitControls::new(&config), cam)
    }

    #[test]
    fn idle_update_keeps_pose() {
        let (mut orbit, mut cam) = setup();
        let eye = cam.eye;
        orbit.update(&mut cam);
        assert!((cam.eye - eye).length() < 1e-3);
    }

    #[test]
    fn dolly_is_clamped_to_bounds() {
        let (mut orbit, mut cam) = setup();
        orbit.dolly(1.0e5);
        for _ in 0..500 {
            orbit.update(&mut cam);
        }
        assert!((orbit.distance() - orbit.max_distance).abs() < 1e-3);
        orbit.dolly(-1.0e5);
        for _ in 0..500 {
            orbit.update(&mut cam);
        }
        assert!((orbit.distance() - orbit.min_distance).abs() < 1e-3);
    }

    #[test]
    fn rotation_eases_out_and_stays_off_poles() {
        let (mut orbit, mut cam) = setup();
        orbit.rotate(0.0, 1.0e5);
        orbit.update(&mut cam);
        assert!(orbit.has_pending());
        for _ in 0..1000 {
            orbit.update(&mut cam);
        }
        let dir = (cam.eye - cam.target).normalize();
        assert!(dir.y.abs() < 1.0);
        assert!(!orbit.has_pending());
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let (mut orbit, mut cam) = setup();
        orbit.enabled = false;
        orbit.rotate(100.0, 0.0);
        orbit.dolly(100.0);
        assert!(!orbit.has_pending());
        let eye = cam.eye;
        orbit.update(&mut cam);
        assert_eq!(cam.eye, eye);
    }
}
