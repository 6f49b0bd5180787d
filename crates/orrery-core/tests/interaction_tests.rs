mod common;

use common::Harness;
use orrery_core::{CameraMode, InteractionState, Notification, OrreryError};

fn transitioning(body: Option<orrery_core::BodyId>) -> Notification {
    Notification::StateChanged {
        state: InteractionState::Transitioning,
        body,
    }
}

#[test]
fn hover_is_reported_only_on_change() {
    let mut h = Harness::new();
    let alpha = h.id("alpha");
    let (x, y) = h.screen_of("alpha");

    h.orrery.on_pointer_move(x, y);
    assert_eq!(h.tick(), vec![Notification::BodyHovered(Some(alpha))]);
    h.orrery.on_pointer_move(x + 1.0, y);
    assert!(h.tick().is_empty());
    h.orrery.on_pointer_move(2.0, 2.0);
    assert_eq!(h.tick(), vec![Notification::BodyHovered(None)]);
}

#[test]
fn click_focuses_then_return_restores_overview() {
    let mut h = Harness::new();
    let alpha = h.id("alpha");
    let (x, y) = h.screen_of("alpha");
    h.orrery.on_pointer_move(x, y);
    h.tick();

    assert_eq!(h.orrery.on_pointer_click(x, y), Some(alpha));
    assert_eq!(h.orrery.state(), InteractionState::Transitioning);
    assert_eq!(h.orrery.selected(), Some(alpha));
    assert!(h.orrery.hovered().is_none());
    assert_eq!(
        h.tick(),
        vec![Notification::BodyHovered(None), transitioning(Some(alpha))]
    );

    let notes = h.run(1.3);
    assert_eq!(
        notes,
        vec![
            Notification::StateChanged {
                state: InteractionState::Focused,
                body: Some(alpha),
            },
            Notification::BodySelected(alpha),
        ]
    );
    assert_eq!(h.orrery.rig().mode(), CameraMode::Parallax);
    assert!(h.orrery.bodies().get(alpha).unwrap().effect.enabled);

    assert!(h.orrery.on_secondary_action());
    assert!(h.orrery.selected().is_none());
    assert!(!h.orrery.bodies().get(alpha).unwrap().effect.enabled);
    assert_eq!(h.tick(), vec![transitioning(None)]);

    let notes = h.run(1.3);
    assert_eq!(
        notes,
        vec![Notification::StateChanged {
            state: InteractionState::Overview,
            body: None,
        }]
    );
    assert_eq!(h.orrery.rig().mode(), CameraMode::Orbit);
}

#[test]
fn click_on_empty_space_does_nothing() {
    let mut h = Harness::new();
    assert_eq!(h.orrery.on_pointer_click(2.0, 2.0), None);
    assert_eq!(h.orrery.state(), InteractionState::Overview);
    assert!(h.tick().is_empty());
}

#[test]
fn clicks_are_ignored_outside_overview() {
    let mut h = Harness::new();
    h.orrery.focus_body("alpha").unwrap();
    let (x, y) = h.screen_of("beta");
    assert_eq!(h.orrery.on_pointer_click(x, y), None);
    assert_eq!(h.orrery.selected(), Some(h.id("alpha")));
}

#[test]
fn superseded_focus_never_completes() {
    let mut h = Harness::new();
    let (alpha, beta) = (h.id("alpha"), h.id("beta"));
    h.orrery.focus_body("alpha").unwrap();
    h.run(0.5);
    h.orrery.focus_body("beta").unwrap();
    assert!(!h.orrery.bodies().get(alpha).unwrap().effect.enabled);
    assert!(h.orrery.bodies().get(beta).unwrap().effect.enabled);
    h.run(2.0);

    assert_eq!(h.orrery.state(), InteractionState::Focused);
    assert_eq!(h.orrery.selected(), Some(beta));
    let selected: Vec<_> = h
        .log
        .iter()
        .filter_map(|n| match n {
            Notification::BodySelected(id) => Some(*id),
            _ => None,
        })
        .collect();
    assert_eq!(selected, vec![beta]);
}

#[test]
fn refocusing_body_in_flight_keeps_its_transition() {
    let mut h = Harness::new();
    let alpha = h.id("alpha");
    h.orrery.focus_body("alpha").unwrap();
    h.run(0.3);
    let token = h.orrery.rig().active_token();
    assert!(token.is_some());

    h.orrery.focus_body("alpha").unwrap();
    assert_eq!(h.orrery.rig().active_token(), token);
    h.run(2.0);

    assert_eq!(h.orrery.state(), InteractionState::Focused);
    let departures = h
        .log
        .iter()
        .filter(|n| **n == transitioning(Some(alpha)))
        .count();
    assert_eq!(departures, 1);
}

#[test]
fn return_during_focus_transition_wins() {
    let mut h = Harness::new();
    h.orrery.focus_body("beta").unwrap();
    h.run(0.4);
    assert!(h.orrery.on_cancel_key());
    h.run(2.0);
    assert_eq!(h.orrery.state(), InteractionState::Overview);
    assert!(!h
        .log
        .iter()
        .any(|n| matches!(n, Notification::BodySelected(_))));
}

#[test]
fn return_is_ignored_in_overview() {
    let mut h = Harness::new();
    assert!(!h.orrery.on_secondary_action());
    assert!(h.tick().is_empty());
}

#[test]
fn unknown_body_is_rejected_without_state_change() {
    let mut h = Harness::new();
    let err = h.orrery.focus_body("pluto").unwrap_err();
    assert_eq!(err, OrreryError::UnknownBody("pluto".into()));
    assert_eq!(h.orrery.state(), InteractionState::Overview);
    assert!(h.tick().is_empty());
}

#[test]
fn body_without_visual_cannot_be_focused() {
    let mut orrery = orrery_core::Orrery::with_bodies(
        orrery_core::OrreryConfig::default(),
        common::still_scene(),
    );
    let err = orrery.focus_body("alpha").unwrap_err();
    assert!(matches!(err, OrreryError::InvalidBody { .. }));
    assert_eq!(orrery.state(), InteractionState::Overview);
}

#[test]
fn focused_pointer_drives_parallax_and_effect() {
    let mut h = Harness::new();
    let alpha = h.id("alpha");
    h.orrery.focus_body("alpha").unwrap();
    h.run(1.5);
    assert_eq!(h.orrery.state(), InteractionState::Focused);

    let eye_before = h.orrery.camera().eye;
    h.orrery.on_pointer_move(common::WIDTH / 2.0, common::HEIGHT / 2.0);
    h.orrery.on_pointer_move(common::WIDTH / 2.0 + 30.0, common::HEIGHT / 2.0);
    let fx = h.orrery.bodies().get(alpha).unwrap().effect;
    assert!(fx.enabled);
    assert!(fx.speed > 0.0);
    assert!(fx.intensity > 0.0);

    h.run(1.0);
    assert!((h.orrery.camera().eye - eye_before).length() > 1e-3);
    assert!(h.orrery.rig().influence().x > 0.0);
}

#[test]
fn camera_follows_moving_focus() {
    let mut h = Harness::new();
    h.orrery.focus_body("alpha").unwrap();
    h.run(1.5);
    let target = h.orrery.camera().target;
    assert!((target - glam::Vec3::new(-30.0, 0.0, 0.0)).length() < 0.5);
}
