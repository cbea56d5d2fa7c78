// Keyboard shortcuts, decoupled from web-sys so they can be tested on the host.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleHelp,
    ToggleInteraction,
    FlipCamera,
    ResetView,
    /// Zero-based catalog index.
    SelectModel(usize),
}

/// Map a `KeyboardEvent.key` value to an action. Modified chords are left to
/// the browser.
pub fn action_for_key(key: &str, modified: bool) -> Option<KeyAction> {
    if modified {
        return None;
    }
    match key {
        "h" | "H" | "?" => Some(KeyAction::ToggleHelp),
        "i" | "I" => Some(KeyAction::ToggleInteraction),
        "f" | "F" => Some(KeyAction::FlipCamera),
        "r" | "R" => Some(KeyAction::ResetView),
        _ => digit_index(key).map(KeyAction::SelectModel),
    }
}

#[inline]
fn digit_index(key: &str) -> Option<usize> {
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match c.to_digit(10)? {
        0 => None,
        d => Some(d as usize - 1),
    }
}
