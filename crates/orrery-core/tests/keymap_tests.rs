use orrery_core::keymap::{command_for_key, focus_index_for_digit, Command};

#[test]
fn cancel_keys() {
    assert_eq!(command_for_key("Escape"), Some(Command::Cancel));
    assert_eq!(command_for_key("Backspace"), Some(Command::Cancel));
}

#[test]
fn letter_commands_ignore_case() {
    for (lower, upper, cmd) in [
        ("q", "Q", Command::CycleQuality),
        ("a", "A", Command::ToggleAutoQuality),
        ("h", "H", Command::ToggleHelp),
    ] {
        assert_eq!(command_for_key(lower), Some(cmd));
        assert_eq!(command_for_key(upper), Some(cmd));
    }
}

#[test]
fn digits_focus_bodies_by_index() {
    assert_eq!(command_for_key("0"), Some(Command::FocusIndex(0)));
    assert_eq!(command_for_key("3"), Some(Command::FocusIndex(3)));
    assert_eq!(command_for_key("8"), Some(Command::FocusIndex(8)));
    assert_eq!(focus_index_for_digit("9"), None);
}

#[test]
fn unmapped_keys_do_nothing() {
    for key in ["x", "Enter", " ", "ArrowUp", "F1", ""] {
        assert_eq!(command_for_key(key), None, "{key:?}");
    }
}
