//! Tick-driven interpolation.
//!
//! Tweens hold no timers. They are sampled with the current time and report
//! completion once progress reaches 1.

use fnv::FnvHashMap;
use glam::Vec3;
use std::hash::Hash;

#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Eased move of one point between two positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub start: Vec3,
    pub end: Vec3,
    pub start_time: f32,
    pub duration: f32,
}

impl Tween {
    pub fn new(start: Vec3, end: Vec3, start_time: f32, duration: f32) -> Self {
        Self {
            start,
            end,
            start_time,
            duration,
        }
    }

    /// Linear progress in 0..=1. A non-positive duration completes immediately.
    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    /// Interpolated value and whether the tween has finished.
    pub fn sample(&self, now: f32) -> (Vec3, bool) {
        let p = self.progress(now);
        if p >= 1.0 {
            (self.end, true)
        } else {
            (self.start.lerp(self.end, ease_in_out_cubic(p)), false)
        }
    }
}

/// Active tweens keyed by the property they drive.
#[derive(Clone, Debug)]
pub struct TweenSet<K> {
    active: FnvHashMap<K, Tween>,
}

impl<K: Eq + Hash + Copy> Default for TweenSet<K> {
    fn default() -> Self {
        Self {
            active: FnvHashMap::default(),
        }
    }
}

impl<K: Eq + Hash + Copy> TweenSet<K> {
    /// Starts a tween, replacing any tween already driving `key`.
    pub fn insert(&mut self, key: K, tween: Tween) {
        self.active.insert(key, tween);
    }

    pub fn cancel_all(&mut self) {
        self.active.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Current value of the tween on `key`. A finished tween is removed after
    /// yielding its end value.
    pub fn sample(&mut self, key: K, now: f32) -> Option<(Vec3, bool)> {
        let (value, done) = self.active.get(&key)?.sample(now);
        if done {
            self.active.remove(&key);
        }
        Some((value, done))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert!(ease_in_out_cubic(0.0).abs() < 1e-6);
        assert!((ease_in_out_cubic(1.0) - 1.0).abs() < 1e-6);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn tween_completes_at_duration() {
        let tw = Tween::new(Vec3::ZERO, Vec3::X * 10.0, 1.0, 2.0);
        assert_eq!(tw.sample(0.0), (Vec3::ZERO, false));
        let (v, done) = tw.sample(2.0);
        assert!((v.x - 5.0).abs() < 1e-5 && !done);
        assert_eq!(tw.sample(3.0), (Vec3::X * 10.0, true));
        assert_eq!(tw.sample(9.0), (Vec3::X * 10.0, true));
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let tw = Tween::new(Vec3::ZERO, Vec3::ONE, 0.0, 0.0);
        assert_eq!(tw.sample(0.0), (Vec3::ONE, true));
    }

    #[test]
    fn set_removes_finished_and_cancelled() {
        let mut set: TweenSet<u8> = TweenSet::default();
        set.insert(0, Tween::new(Vec3::ZERO, Vec3::ONE, 0.0, 1.0));
        assert_eq!(set.sample(0, 0.5).map(|(_, d)| d), Some(false));
        assert_eq!(set.sample(0, 1.0), Some((Vec3::ONE, true)));
        assert!(set.is_empty());
        assert!(set.sample(0, 2.0).is_none());

        set.insert(1, Tween::new(Vec3::ZERO, Vec3::ONE, 0.0, 1.0));
        set.cancel_all();
        assert!(set.sample(1, 0.5).is_none());
    }
}
