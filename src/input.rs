//! Keyboard mapping for the simulator window.
//!
//! | Key | Action |
//! |-----|--------|
//! | `Up` / `Down` | Toggle region (watch Up/Down buttons) |
//! | `S` | Request a single-score refresh for the selected region |
//! | `D` | Toggle simulated disconnect |
//! | `H` | Force an hour tick |
//! | `L` | Switch between watch face and logs |
//! | `Escape` | Quit |
//!
//! Keys are matched by their SDL key name so the mapping can be tested
//! without an SDL context.

use visibility_common::Button;

/// What a key press does.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyAction {
    /// Forward a watch button press.
    Press(Button),
    RequestScore,
    ToggleConnection,
    HourTick,
    TogglePage,
    Quit,
}

impl KeyAction {
    /// Action for an SDL key name (as returned by `Keycode::name`).
    pub fn from_key_name(name: &str) -> Option<Self> {
        let action = match name {
            "Up" => Self::Press(Button::Up),
            "Down" => Self::Press(Button::Down),
            "Return" => Self::Press(Button::Select),
            "Backspace" => Self::Press(Button::Back),
            "S" => Self::RequestScore,
            "D" => Self::ToggleConnection,
            "H" => Self::HourTick,
            "L" => Self::TogglePage,
            "Escape" => Self::Quit,
            _ => return None,
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_press_buttons() {
        assert_eq!(KeyAction::from_key_name("Up"), Some(KeyAction::Press(Button::Up)));
        assert_eq!(KeyAction::from_key_name("Down"), Some(KeyAction::Press(Button::Down)));
    }

    #[test]
    fn test_simulator_keys() {
        assert_eq!(KeyAction::from_key_name("S"), Some(KeyAction::RequestScore));
        assert_eq!(KeyAction::from_key_name("D"), Some(KeyAction::ToggleConnection));
        assert_eq!(KeyAction::from_key_name("H"), Some(KeyAction::HourTick));
        assert_eq!(KeyAction::from_key_name("L"), Some(KeyAction::TogglePage));
        assert_eq!(KeyAction::from_key_name("Escape"), Some(KeyAction::Quit));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(KeyAction::from_key_name("X"), None);
        assert_eq!(KeyAction::from_key_name("s"), None, "SDL key names are upper case");
        assert_eq!(KeyAction::from_key_name(""), None);
    }
}
