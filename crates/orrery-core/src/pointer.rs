use crate::config::PointerConfig;
use glam::Vec2;

/// Normalized pointer position plus a decaying motion estimate.
///
/// `screen` is in the unit square with y down (as raw pointer coordinates),
/// `ndc` is in -1..1 with the origin at the centre and y up.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    config: PointerConfig,
    viewport: Vec2,
    screen: Vec2,
    prev_screen: Vec2,
    ndc: Vec2,
    velocity: Vec2,
    speed: f32,
    has_sample: bool,
}

impl PointerTracker {
    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            viewport: Vec2::ONE,
            screen: Vec2::splat(0.5),
            prev_screen: Vec2::splat(0.5),
            ndc: Vec2::ZERO,
            velocity: Vec2::ZERO,
            speed: 0.0,
            has_sample: false,
        }
    }

    /// Size in pixels of the surface raw coordinates are measured against.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn on_move(&mut self, raw_x: f32, raw_y: f32) {
        let screen = (Vec2::new(raw_x, raw_y) / self.viewport).clamp(Vec2::ZERO, Vec2::ONE);
        self.prev_screen = if self.has_sample { self.screen } else { screen };
        self.screen = screen;
        self.ndc = Vec2::new(screen.x * 2.0 - 1.0, -(screen.y * 2.0 - 1.0));
        self.velocity = self.screen - self.prev_screen;
        self.speed = self.velocity.length() * self.config.speed_scale;
        self.has_sample = true;
    }

    /// Per-tick settling, independent of pointer activity.
    pub fn decay(&mut self) {
        self.velocity *= self.config.velocity_decay;
        self.speed *= self.config.speed_decay;
    }

    #[inline]
    pub fn screen(&self) -> Vec2 {
        self.screen
    }
    #[inline]
    pub fn prev_screen(&self) -> Vec2 {
        self.prev_screen
    }
    #[inline]
    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }
    #[inline]
    pub fn has_sample(&self) -> bool {
        self.has_sample
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(PointerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> PointerTracker {
        let mut p = PointerTracker::default();
        p.set_viewport(200.0, 100.0);
        p
    }

    #[test]
    fn normalizes_and_flips_y() {
        let mut p = tracker();
        p.on_move(200.0, 0.0);
        assert_eq!(p.screen(), Vec2::new(1.0, 0.0));
        assert_eq!(p.ndc(), Vec2::new(1.0, 1.0));
        p.on_move(100.0, 50.0);
        assert_eq!(p.ndc(), Vec2::ZERO);
    }

    #[test]
    fn out_of_bounds_coordinates_are_clamped() {
        let mut p = tracker();
        p.on_move(-50.0, 500.0);
        assert_eq!(p.screen(), Vec2::new(0.0, 1.0));
        assert_eq!(p.ndc(), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn first_sample_has_no_velocity() {
        let mut p = tracker();
        p.on_move(150.0, 20.0);
        assert_eq!(p.velocity(), Vec2::ZERO);
        assert_eq!(p.speed(), 0.0);
    }

    #[test]
    fn speed_is_scaled_delta() {
        let mut p = tracker();
        p.on_move(0.0, 0.0);
        p.on_move(20.0, 0.0);
        assert!((p.velocity().x - 0.1).abs() < 1e-6);
        assert!((p.speed() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn decay_scales_velocity_and_speed() {
        let mut p = tracker();
        p.on_move(0.0, 0.0);
        p.on_move(40.0, 0.0);
        let (v0, s0) = (p.velocity(), p.speed());
        p.decay();
        assert!((p.velocity() - v0 * 0.9).length() < 1e-6);
        assert!((p.speed() - s0 * 0.75).abs() < 1e-6);
    }
}
