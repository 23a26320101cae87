/// What a key press asks the scene controller to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Advance,
    Back,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Enter" => Some(KeyAction::Advance),
        "Escape" => Some(KeyAction::Back),
        _ => None,
    }
}

// Events that consume an armed music retry
pub const GESTURE_EVENTS: [&str; 3] = ["click", "touchend", "keydown"];
