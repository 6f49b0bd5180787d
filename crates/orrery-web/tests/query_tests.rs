// Host-side tests for query string overrides.

#![allow(dead_code)]
#[path = "../src/query.rs"]
mod query;

use orrery_core::OrreryConfig;
use query::QueryParams;

#[test]
fn parses_pairs_with_or_without_question_mark() {
    let a = QueryParams::parse("?seed=7&quality=low");
    let b = QueryParams::parse("seed=7&quality=low");
    assert_eq!(a, b);
    assert_eq!(a.get("seed"), Some("7"));
    assert_eq!(a.get("quality"), Some("low"));
    assert_eq!(a.len(), 2);
}

#[test]
fn empty_search_has_no_params() {
    assert!(QueryParams::parse("").is_empty());
    assert!(QueryParams::parse("?").is_empty());
    assert!(QueryParams::parse("?&&").is_empty());
}

#[test]
fn later_duplicates_win_and_bare_keys_are_empty() {
    let q = QueryParams::parse("seed=1&seed=2&debug");
    assert_eq!(q.get("seed"), Some("2"));
    assert_eq!(q.get("debug"), Some(""));
}

#[test]
fn percent_and_plus_decoding() {
    let q = QueryParams::parse("name=hello+world&x=%41%62&bad=%zz&tail=%4");
    assert_eq!(q.get("name"), Some("hello world"));
    assert_eq!(q.get("x"), Some("Ab"));
    assert_eq!(q.get("bad"), Some("%zz"));
    assert_eq!(q.get("tail"), Some("%4"));
}

#[test]
fn config_keys_accept_short_and_full_forms() {
    let q = QueryParams::parse("seed=11&ORRERY_TRANSITION_SECS=2.5");
    assert_eq!(q.config_value("ORRERY_SEED").as_deref(), Some("11"));
    assert_eq!(q.config_value("ORRERY_TRANSITION_SECS").as_deref(), Some("2.5"));
    assert_eq!(q.config_value("ORRERY_FOV_DEGREES"), None);
}

#[test]
fn feeds_orrery_config() {
    let q = QueryParams::parse("?seed=99&transition_secs=2&fov_degrees=nan");
    let config = OrreryConfig::from_lookup(|key| q.config_value(key));
    assert_eq!(config.seed, 99);
    assert_eq!(config.transition_secs, 2.0);
    // rejected values keep the default
    assert_eq!(config.camera.fov_degrees, OrreryConfig::default().camera.fov_degrees);
}
