use glam::Vec2;

/// Pointer travel (logical px) after which a press turns into an orbit drag.
pub const DRAG_THRESHOLD_PX: f32 = 4.0;

/// Tells a primary-button click apart from an orbit drag.
///
/// A press that travels less than [`DRAG_THRESHOLD_PX`] before release is a
/// click. Once the threshold is crossed every further move yields a drag
/// delta and the release is swallowed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerGesture {
    origin: Option<Vec2>,
    last: Vec2,
    dragging: bool,
}

impl PointerGesture {
    pub fn press(&mut self, pos: Vec2) {
        self.origin = Some(pos);
        self.last = pos;
        self.dragging = false;
    }

    /// Returns the drag delta since the previous move, if dragging.
    pub fn moved(&mut self, pos: Vec2) -> Option<Vec2> {
        let origin = self.origin?;
        if !self.dragging && pos.distance(origin) < DRAG_THRESHOLD_PX {
            return None;
        }
        self.dragging = true;
        let delta = pos - self.last;
        self.last = pos;
        Some(delta)
    }

    /// Ends the gesture. Returns the press position when it was a click.
    pub fn release(&mut self) -> Option<Vec2> {
        let origin = self.origin.take()?;
        let was_drag = std::mem::replace(&mut self.dragging, false);
        (!was_drag).then_some(origin)
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.dragging = false;
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.origin.is_some()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}
