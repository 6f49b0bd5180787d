/// Pixels per wheel "line" when the browser reports `DOM_DELTA_LINE`.
pub const WHEEL_LINE_PX: f32 = 16.0;
/// Pixels per wheel "page" when the browser reports `DOM_DELTA_PAGE`.
pub const WHEEL_PAGE_PX: f32 = 800.0;

/// Normalizes a wheel delta to pixels. `mode` is `WheelEvent::delta_mode()`.
#[inline]
pub fn wheel_delta_px(delta_y: f64, mode: u32) -> f32 {
    let scale = match mode {
        1 => WHEEL_LINE_PX,
        2 => WHEEL_PAGE_PX,
        _ => 1.0,
    };
    delta_y as f32 * scale
}
