use orrery_core::{FrameRateMonitor, QualityConfig, QualityController, QualityLevel};

#[test]
fn rolling_window_reports_steady_rate() {
    let mut monitor = FrameRateMonitor::new(60);
    for _ in 0..120 {
        monitor.push(1.0 / 60.0);
    }
    assert_eq!(monitor.len(), 60);
    assert!(monitor.is_full());
    let fps = monitor.average_fps().unwrap();
    assert!((fps - 60.0).abs() < 0.1, "fps {fps}");
}

#[test]
fn window_evicts_old_samples() {
    let mut monitor = FrameRateMonitor::new(60);
    for _ in 0..60 {
        monitor.push(1.0 / 20.0);
    }
    for _ in 0..60 {
        monitor.push(1.0 / 60.0);
    }
    let fps = monitor.average_fps().unwrap();
    assert!((fps - 60.0).abs() < 0.1, "fps {fps}");
}

#[test]
fn no_switch_until_window_is_full() {
    let mut q = QualityController::new(QualityConfig::default());
    for _ in 0..59 {
        assert!(q.record_frame(1.0 / 10.0).is_none());
    }
    let mut frames = 59;
    let preset = loop {
        frames += 1;
        if let Some(p) = q.record_frame(1.0 / 10.0) {
            break p;
        }
        assert!(frames < 300, "never switched");
    };
    assert_eq!(preset.level, QualityLevel::Low);
    assert!(frames > 60);
}

#[test]
fn level_changes_are_at_least_dwell_apart() {
    let mut q = QualityController::new(QualityConfig::default());
    let mut changes = Vec::new();
    let frames = std::iter::repeat(1.0 / 60.0)
        .take(60)
        .chain(std::iter::repeat(1.0 / 20.0).take(200))
        .chain(std::iter::repeat(1.0 / 120.0).take(200));
    for (i, dt) in frames.enumerate() {
        if let Some(preset) = q.record_frame(dt) {
            changes.push((i, preset.level));
        }
    }
    // each change waits until the window has settled on the new rate
    let levels: Vec<_> = changes.iter().map(|(_, l)| *l).collect();
    assert_eq!(levels, vec![QualityLevel::Low, QualityLevel::High]);
    for pair in changes.windows(2) {
        assert!(pair[1].0 - pair[0].0 >= 60, "{changes:?}");
    }
}

#[test]
fn single_frame_spike_does_not_switch() {
    let mut q = QualityController::new(QualityConfig::default());
    let frames = std::iter::repeat(1.0 / 60.0)
        .take(200)
        .chain(std::iter::once(0.25))
        .chain(std::iter::repeat(1.0 / 60.0).take(300));
    for (i, dt) in frames.enumerate() {
        assert!(q.record_frame(dt).is_none(), "switched at frame {i}");
    }
    assert_eq!(q.level(), QualityLevel::High);
}

#[test]
fn sustained_drop_still_switches() {
    let mut q = QualityController::new(QualityConfig::default());
    for _ in 0..200 {
        q.record_frame(1.0 / 60.0);
    }
    let switched = (0..200).find_map(|_| q.record_frame(1.0 / 40.0));
    assert_eq!(switched.map(|p| p.level), Some(QualityLevel::Medium));
}

#[test]
fn oscillating_frame_times_do_not_thrash() {
    let mut q = QualityController::new(QualityConfig::default());
    let mut last_change = None;
    for i in 0..600 {
        // alternate around the medium/high boundary
        let dt = if (i / 20) % 2 == 0 { 1.0 / 70.0 } else { 1.0 / 45.0 };
        if q.record_frame(dt).is_some() {
            if let Some(prev) = last_change {
                assert!(i - prev >= 60);
            }
            last_change = Some(i);
        }
    }
}

#[test]
fn manual_override_and_resume() {
    let mut q = QualityController::new(QualityConfig::default());
    assert_eq!(
        q.set_override(QualityLevel::Medium).map(|p| p.level),
        Some(QualityLevel::Medium)
    );
    for _ in 0..200 {
        assert!(q.record_frame(1.0 / 10.0).is_none());
    }
    q.set_auto(true);
    let mut switched = None;
    for _ in 0..100 {
        if let Some(p) = q.record_frame(1.0 / 10.0) {
            switched = Some(p.level);
        }
    }
    assert_eq!(switched, Some(QualityLevel::Low));
}

#[test]
fn presets_degrade_monotonically() {
    let (h, m, l) = (
        QualityLevel::High.preset(),
        QualityLevel::Medium.preset(),
        QualityLevel::Low.preset(),
    );
    assert!(h.resolution_scale > m.resolution_scale && m.resolution_scale > l.resolution_scale);
    assert!(h.tessellation > m.tessellation && m.tessellation > l.tessellation);
    assert!(h.bloom_enabled && m.bloom_enabled && !l.bloom_enabled);
}

#[test]
fn invalid_frame_times_are_ignored() {
    let mut q = QualityController::new(QualityConfig::default());
    for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        assert!(q.record_frame(dt).is_none());
    }
    assert!(q.monitor().is_empty());
}
