//! Platform-agnostic input event types.
//!
//! Every backend maps its native input to these enums. The shell never sees
//! raw platform input. The bound key surface is deliberately small: movement
//! (arrows or WASD), Confirm (Enter), and Back (Backspace).

use serde::{Deserialize, Serialize};

/// A platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to absolute position.
    CursorMove { x: i32, y: i32 },
    /// A navigation button pressed.
    ButtonPress(Button),
    /// A navigation button released.
    ButtonRelease(Button),
    /// Pointer pressed at absolute position (mouse or touch).
    PointerDown { x: i32, y: i32 },
    /// Pointer released.
    PointerRelease { x: i32, y: i32 },
    /// The shell window gained focus.
    FocusGained,
    /// The shell window lost focus.
    FocusLost,
    /// User requested quit (window close, etc.).
    Quit,
}

/// Buttons that map across all platforms.
///
/// `Up`/`Down`/`Left`/`Right` cover both arrow keys and their WASD
/// equivalents; backends perform that folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    /// Enter: activate the selection or the focused control.
    Confirm,
    /// Backspace: leave the viewer or return to the parent menu.
    Back,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_move_event() {
        let e = InputEvent::CursorMove { x: 100, y: 200 };
        assert_eq!(e, InputEvent::CursorMove { x: 100, y: 200 });
    }

    #[test]
    fn cursor_move_negative_coords() {
        let e = InputEvent::CursorMove { x: -10, y: -20 };
        if let InputEvent::CursorMove { x, y } = e {
            assert_eq!(x, -10);
            assert_eq!(y, -20);
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn button_press_all_variants() {
        let buttons = [
            Button::Up,
            Button::Down,
            Button::Left,
            Button::Right,
            Button::Confirm,
            Button::Back,
        ];
        for btn in buttons {
            let e = InputEvent::ButtonPress(btn);
            assert_eq!(e, InputEvent::ButtonPress(btn));
        }
    }

    #[test]
    fn button_release_differs_from_press() {
        let press = InputEvent::ButtonPress(Button::Confirm);
        let release = InputEvent::ButtonRelease(Button::Confirm);
        assert_ne!(press, release);
    }

    #[test]
    fn pointer_down_event() {
        let e = InputEvent::PointerDown { x: 240, y: 136 };
        if let InputEvent::PointerDown { x, y } = e {
            assert_eq!(x, 240);
            assert_eq!(y, 136);
        }
    }

    #[test]
    fn pointer_release_event() {
        let e = InputEvent::PointerRelease { x: 0, y: 0 };
        assert_eq!(e, InputEvent::PointerRelease { x: 0, y: 0 });
    }

    #[test]
    fn focus_and_quit_events() {
        assert_eq!(InputEvent::FocusGained, InputEvent::FocusGained);
        assert_eq!(InputEvent::FocusLost, InputEvent::FocusLost);
        assert_eq!(InputEvent::Quit, InputEvent::Quit);
        assert_ne!(InputEvent::FocusGained, InputEvent::FocusLost);
        assert_ne!(InputEvent::FocusGained, InputEvent::Quit);
    }

    #[test]
    fn button_clone_and_copy() {
        let b = Button::Confirm;
        let b2 = b;
        let b3 = b.clone();
        assert_eq!(b, b2);
        assert_eq!(b, b3);
    }

    #[test]
    fn button_debug_format() {
        let dbg = format!("{:?}", Button::Back);
        assert_eq!(dbg, "Back");
    }

    #[test]
    fn button_hash_distinct() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Button::Up);
        set.insert(Button::Down);
        set.insert(Button::Up);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn button_serde_roundtrip() {
        let b = Button::Confirm;
        let json = serde_json::to_string(&b).unwrap();
        let b2: Button = serde_json::from_str(&json).unwrap();
        assert_eq!(b, b2);
    }

    #[test]
    fn input_event_clone() {
        let e = InputEvent::CursorMove { x: 42, y: 99 };
        let e2 = e.clone();
        assert_eq!(e, e2);
    }

    #[test]
    fn all_event_variants_distinct() {
        let events: Vec<InputEvent> = vec![
            InputEvent::CursorMove { x: 0, y: 0 },
            InputEvent::ButtonPress(Button::Up),
            InputEvent::ButtonRelease(Button::Up),
            InputEvent::PointerDown { x: 0, y: 0 },
            InputEvent::PointerRelease { x: 0, y: 0 },
            InputEvent::FocusGained,
            InputEvent::FocusLost,
            InputEvent::Quit,
        ];
        for (i, a) in events.iter().enumerate() {
            for (j, b) in events.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "variants {i} and {j} should differ");
                }
            }
        }
    }
}
