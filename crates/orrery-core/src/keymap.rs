//! Key bindings shared by the front ends. Keys use DOM `KeyboardEvent.key`
//! names; the native front end maps winit keys onto the same names.

/// Keyboard commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Leave focus and fly back to the overview.
    Cancel,
    CycleQuality,
    ToggleAutoQuality,
    /// Only meaningful where there is a help overlay.
    ToggleHelp,
    /// Focus the body at this registry index (0 is the star).
    FocusIndex(usize),
}

#[inline]
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "Escape" | "Backspace" => Some(Command::Cancel),
        "q" | "Q" => Some(Command::CycleQuality),
        "a" | "A" => Some(Command::ToggleAutoQuality),
        "h" | "H" | "?" => Some(Command::ToggleHelp),
        _ => focus_index_for_digit(key).map(Command::FocusIndex),
    }
}

/// "0" is the star, "1".."8" the planets outward.
#[inline]
pub fn focus_index_for_digit(key: &str) -> Option<usize> {
    match key {
        "0" => Some(0),
        "1" => Some(1),
        "2" => Some(2),
        "3" => Some(3),
        "4" => Some(4),
        "5" => Some(5),
        "6" => Some(6),
        "7" => Some(7),
        "8" => Some(8),
        _ => None,
    }
}
