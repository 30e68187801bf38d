//! Overlay keyboard map.

use wm_host::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Keys the switcher overlay reacts to.
pub enum SwitcherKey {
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Delete,
    Backspace,
    Char(char),
}

impl SwitcherKey {
    /// Parses a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Option<Self> {
        let key = match name {
            "Escape" => Self::Escape,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "Enter" => Self::Enter,
            "Delete" => Self::Delete,
            "Backspace" => Self::Backspace,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What a key asks the switcher to do.
pub enum KeyAction {
    Ignore,
    HideOverlay,
    Advance(isize),
    StepWorkspace(isize),
    ActivateCurrent,
    CloseCurrent,
    MoveCurrent,
    FocusWorkspace(u8),
}

/// Maps `key` to an action. Only Escape is honoured while the search box has focus.
pub fn map_key(key: SwitcherKey, search_focused: bool) -> KeyAction {
    if key == SwitcherKey::Escape {
        return KeyAction::HideOverlay;
    }
    if search_focused {
        return KeyAction::Ignore;
    }
    match key {
        SwitcherKey::ArrowRight => KeyAction::Advance(1),
        SwitcherKey::ArrowLeft => KeyAction::Advance(-1),
        SwitcherKey::ArrowDown => KeyAction::StepWorkspace(1),
        SwitcherKey::ArrowUp => KeyAction::StepWorkspace(-1),
        SwitcherKey::Enter => KeyAction::ActivateCurrent,
        SwitcherKey::Delete | SwitcherKey::Backspace => KeyAction::CloseCurrent,
        SwitcherKey::Char('m' | 'M') => KeyAction::MoveCurrent,
        SwitcherKey::Char(c @ '1'..='9') => KeyAction::FocusWorkspace(c as u8 - b'0'),
        SwitcherKey::Char(_) | SwitcherKey::Escape => KeyAction::Ignore,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Effect a handled key actually had.
pub enum KeyOutcome {
    /// Nothing happened (unmapped key, or nothing to act on).
    Ignored,
    HideOverlay,
    /// Navigation cursor moved.
    Navigated,
    WorkspaceSelected,
    Activated(WindowId),
    Closed(WindowId),
    OpenMovePopup(WindowId),
    FocusWorkspace(u8),
}
