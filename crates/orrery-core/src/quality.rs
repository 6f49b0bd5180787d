//! Adaptive quality: a rolling frame-time window drives level changes with
//! a minimum dwell between switches.

use crate::config::QualityConfig;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityLevel {
    Low,
    Medium,
    High,
}

impl QualityLevel {
    pub fn preset(self) -> QualityPreset {
        match self {
            QualityLevel::High => QualityPreset {
                level: self,
                resolution_scale: 1.0,
                bloom_enabled: true,
                bloom_strength: 1.5,
                tessellation: 64,
            },
            QualityLevel::Medium => QualityPreset {
                level: self,
                resolution_scale: 0.75,
                bloom_enabled: true,
                bloom_strength: 0.8,
                tessellation: 32,
            },
            QualityLevel::Low => QualityPreset {
                level: self,
                resolution_scale: 0.5,
                bloom_enabled: false,
                bloom_strength: 0.0,
                tessellation: 16,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            QualityLevel::High => "high",
            QualityLevel::Medium => "medium",
            QualityLevel::Low => "low",
        }
    }

    /// Next level for a manual "cycle quality" control: High, Medium, Low, High.
    pub fn cycled(self) -> Self {
        match self {
            QualityLevel::High => QualityLevel::Medium,
            QualityLevel::Medium => QualityLevel::Low,
            QualityLevel::Low => QualityLevel::High,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(QualityLevel::High),
            "medium" | "med" => Some(QualityLevel::Medium),
            "low" => Some(QualityLevel::Low),
            _ => None,
        }
    }
}

/// Renderer settings for one quality level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityPreset {
    pub level: QualityLevel,
    /// Fraction of the device pixel ratio used for the render targets.
    pub resolution_scale: f32,
    pub bloom_enabled: bool,
    pub bloom_strength: f32,
    /// Hint for sphere segment count.
    pub tessellation: u32,
}

/// Bounded FIFO of frame durations in seconds with a running sum.
#[derive(Clone, Debug)]
pub struct FrameRateMonitor {
    samples: VecDeque<f32>,
    capacity: usize,
    sum: f64,
}

impl FrameRateMonitor {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            sum: 0.0,
        }
    }

    pub fn push(&mut self, dt: f32) {
        if self.samples.len() == self.capacity {
            if let Some(old) = self.samples.pop_front() {
                self.sum -= old as f64;
            }
        }
        self.samples.push_back(dt);
        self.sum += dt as f64;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn mean_frame_time(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        Some((self.sum / self.samples.len() as f64) as f32)
    }

    pub fn average_fps(&self) -> Option<f32> {
        self.mean_frame_time()
            .filter(|dt| *dt > 0.0)
            .map(|dt| 1.0 / dt)
    }
}

pub struct QualityController {
    config: QualityConfig,
    monitor: FrameRateMonitor,
    level: QualityLevel,
    frames_since_change: u32,
    // consecutive full-window frames whose average points away from `level`
    off_level_frames: usize,
    auto: bool,
}

impl QualityController {
    pub fn new(config: QualityConfig) -> Self {
        Self {
            monitor: FrameRateMonitor::new(config.sample_size),
            level: QualityLevel::High,
            frames_since_change: 0,
            off_level_frames: 0,
            auto: config.auto,
            config,
        }
    }

    #[inline]
    pub fn level(&self) -> QualityLevel {
        self.level
    }
    #[inline]
    pub fn preset(&self) -> QualityPreset {
        self.level.preset()
    }
    #[inline]
    pub fn is_auto(&self) -> bool {
        self.auto
    }
    pub fn monitor(&self) -> &FrameRateMonitor {
        &self.monitor
    }

    fn level_for(&self, fps: f32) -> QualityLevel {
        if fps >= self.config.high_fps {
            QualityLevel::High
        } else if fps < self.config.low_fps {
            QualityLevel::Low
        } else {
            QualityLevel::Medium
        }
    }

    fn switch_to(&mut self, level: QualityLevel) -> QualityPreset {
        self.level = level;
        self.frames_since_change = 0;
        self.off_level_frames = 0;
        level.preset()
    }

    /// Records one frame duration. Returns a preset when the level changes.
    ///
    /// A new level must outlast a full turnover of the sample window, so a
    /// single outlier frame can never carry a switch on its own.
    pub fn record_frame(&mut self, dt: f32) -> Option<QualityPreset> {
        if !dt.is_finite() || dt <= 0.0 {
            return None;
        }
        self.monitor.push(dt);
        self.frames_since_change = self.frames_since_change.saturating_add(1);

        if !self.auto || !self.monitor.is_full() {
            self.off_level_frames = 0;
            return None;
        }
        let fps = self.monitor.average_fps()?;
        let target = self.level_for(fps);
        if target == self.level {
            self.off_level_frames = 0;
            return None;
        }
        self.off_level_frames += 1;
        if self.off_level_frames <= self.monitor.capacity()
            || self.frames_since_change < self.config.min_dwell_frames
        {
            return None;
        }
        log::info!(
            "[quality] {} -> {} at {:.1} fps",
            self.level.name(),
            target.name(),
            fps
        );
        Some(self.switch_to(target))
    }

    /// Pins a level and disables automatic switching.
    pub fn set_override(&mut self, level: QualityLevel) -> Option<QualityPreset> {
        self.auto = false;
        if level == self.level {
            return None;
        }
        log::info!("[quality] override {}", level.name());
        Some(self.switch_to(level))
    }

    pub fn set_auto(&mut self, enabled: bool) {
        if enabled && !self.auto {
            self.frames_since_change = 0;
            self.off_level_frames = 0;
        }
        self.auto = enabled;
    }

    pub fn fps_display(&self) -> String {
        match self.monitor.average_fps() {
            Some(fps) => format!("{:.0} FPS", fps),
            None => "-- FPS".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitor_evicts_oldest() {
        let mut m = FrameRateMonitor::new(3);
        for dt in [1.0, 2.0, 3.0, 4.0] {
            m.push(dt);
        }
        assert_eq!(m.len(), 3);
        assert!((m.mean_frame_time().unwrap() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn cycling_visits_every_level() {
        let mut level = QualityLevel::High;
        let mut seen = Vec::new();
        for _ in 0..3 {
            level = level.cycled();
            seen.push(level);
        }
        assert_eq!(
            seen,
            vec![QualityLevel::Medium, QualityLevel::Low, QualityLevel::High]
        );
    }

    #[test]
    fn thresholds_pick_levels() {
        let c = QualityController::new(QualityConfig::default());
        assert_eq!(c.level_for(60.0), QualityLevel::High);
        assert_eq!(c.level_for(55.0), QualityLevel::High);
        assert_eq!(c.level_for(54.9), QualityLevel::Medium);
        assert_eq!(c.level_for(30.0), QualityLevel::Medium);
        assert_eq!(c.level_for(29.9), QualityLevel::Low);
    }

    #[test]
    fn override_disables_auto() {
        let mut c = QualityController::new(QualityConfig::default());
        let preset = c.set_override(QualityLevel::Low).unwrap();
        assert!(!preset.bloom_enabled);
        assert!(!c.is_auto());
        for _ in 0..200 {
            assert!(c.record_frame(1.0 / 120.0).is_none());
        }
        assert_eq!(c.level(), QualityLevel::Low);
    }

    #[test]
    fn display_string() {
        let mut c = QualityController::new(QualityConfig::default());
        assert_eq!(c.fps_display(), "-- FPS");
        c.record_frame(0.02);
        assert_eq!(c.fps_display(), "50 FPS");
    }

    #[test]
    fn parse_level_names() {
        assert_eq!(QualityLevel::parse(" High "), Some(QualityLevel::High));
        assert_eq!(QualityLevel::parse("med"), Some(QualityLevel::Medium));
        assert_eq!(QualityLevel::parse("ultra"), None);
    }
}
