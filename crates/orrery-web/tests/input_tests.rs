// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn pixel_deltas_pass_through() {
    assert_eq!(wheel_delta_px(120.0, 0), 120.0);
    assert_eq!(wheel_delta_px(-4.5, 0), -4.5);
}

#[test]
fn line_and_page_deltas_scale_to_pixels() {
    assert_eq!(wheel_delta_px(3.0, 1), 3.0 * WHEEL_LINE_PX);
    assert_eq!(wheel_delta_px(-1.0, 2), -WHEEL_PAGE_PX);
}

#[test]
fn unknown_modes_are_treated_as_pixels() {
    assert_eq!(wheel_delta_px(10.0, 7), 10.0);
}
