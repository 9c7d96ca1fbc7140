//! Typed keyboard dispatch and activation resolution.
//!
//! Dispatch is a pure function from (mode, button) to a small discriminated
//! action; the shell driver interprets actions and performs the side
//! effects (fetch, render, cues). Activation and back-navigation targets
//! resolve through [`Resolution`] the same way, with no I/O here.

use deck_types::input::Button;

use crate::descriptor::{is_menu_path, FileKind, MenuDescriptor, MenuItem, Variant};

/// Fallback target when nothing else resolves.
pub const DEFAULT_HOME: &str = "index.html";

/// Pixels scrolled per keypress inside the file viewer.
pub const SCROLL_STEP: u32 = 48;

/// Which component owns keyboard dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Menu,
    File,
}

/// Menu-mode action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    MoveDown,
    MoveUp,
    Activate,
    Back,
    None,
}

/// File-mode action. Which set applies depends on whether the viewer hosts
/// an audio control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    ScrollDown,
    ScrollUp,
    FocusRight,
    FocusLeft,
    FocusDown,
    FocusUp,
    ActivateControl,
    Close,
    None,
}

/// Dispatch a button press in menu mode.
pub fn dispatch_menu(button: Button) -> MenuAction {
    match button {
        Button::Down => MenuAction::MoveDown,
        Button::Up => MenuAction::MoveUp,
        Button::Confirm => MenuAction::Activate,
        Button::Back => MenuAction::Back,
        Button::Left | Button::Right => MenuAction::None,
    }
}

/// Dispatch a button press in file mode. With an audio surface present the
/// arrows drive button focus; otherwise vertical arrows scroll content.
pub fn dispatch_file(button: Button, has_audio: bool) -> FileAction {
    if has_audio {
        match button {
            Button::Right => FileAction::FocusRight,
            Button::Left => FileAction::FocusLeft,
            Button::Down => FileAction::FocusDown,
            Button::Up => FileAction::FocusUp,
            Button::Confirm => FileAction::ActivateControl,
            Button::Back => FileAction::Close,
        }
    } else {
        match button {
            Button::Down => FileAction::ScrollDown,
            Button::Up => FileAction::ScrollUp,
            Button::Back => FileAction::Close,
            Button::Confirm | Button::Left | Button::Right => FileAction::None,
        }
    }
}

/// What an activation resolves to. The driver performs the side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Fetch this descriptor and replace the menu (selection resets to 0).
    LoadMenu(String),
    /// Navigate away from the shell entirely (terminal action).
    NavigateExternal(String),
    /// Open the file viewer for this label/kind.
    OpenViewer { label: String, kind: FileKind },
    /// Nothing to do.
    None,
}

fn resolve_target(target: &str) -> Resolution {
    if is_menu_path(target) {
        Resolution::LoadMenu(target.to_string())
    } else {
        Resolution::NavigateExternal(target.to_string())
    }
}

/// Resolve Enter on the selected item.
///
/// Return items resolve their own target, then the descriptor's return,
/// then the default home. Items with a JSON target enter a sub-menu. Under
/// a scroll variant with a declared filetype, any other item opens the
/// viewer. Everything else is a no-op.
pub fn resolve_activate(descriptor: &MenuDescriptor, item: &MenuItem) -> Resolution {
    if item.is_return() {
        let target = item
            .target
            .as_deref()
            .or(descriptor.return_target.as_deref())
            .unwrap_or(DEFAULT_HOME);
        return resolve_target(target);
    }

    if let Some(target) = item.target.as_deref() {
        if is_menu_path(target) {
            return Resolution::LoadMenu(target.to_string());
        }
    }

    if descriptor.variant == Variant::Scroll {
        if let Some(kind) = descriptor.filetype {
            if item.opens_viewer() {
                return Resolution::OpenViewer {
                    label: item.label.clone(),
                    kind,
                };
            }
        }
    }

    Resolution::None
}

/// Resolve Backspace in menu mode: the descriptor's return target, else
/// the default home.
pub fn resolve_back(descriptor: &MenuDescriptor) -> Resolution {
    let target = descriptor.return_target.as_deref().unwrap_or(DEFAULT_HOME);
    resolve_target(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll_text_descriptor() -> MenuDescriptor {
        MenuDescriptor::parse(
            r#"{
                "items": [{"label":"Back","type":"return"},{"label":"a.txt"}],
                "variant": "scroll",
                "filetype": "text",
                "return": "index.html"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn menu_dispatch_table() {
        assert_eq!(dispatch_menu(Button::Down), MenuAction::MoveDown);
        assert_eq!(dispatch_menu(Button::Up), MenuAction::MoveUp);
        assert_eq!(dispatch_menu(Button::Confirm), MenuAction::Activate);
        assert_eq!(dispatch_menu(Button::Back), MenuAction::Back);
        assert_eq!(dispatch_menu(Button::Left), MenuAction::None);
    }

    #[test]
    fn file_dispatch_without_audio_scrolls() {
        assert_eq!(dispatch_file(Button::Down, false), FileAction::ScrollDown);
        assert_eq!(dispatch_file(Button::Up, false), FileAction::ScrollUp);
        assert_eq!(dispatch_file(Button::Back, false), FileAction::Close);
        assert_eq!(dispatch_file(Button::Confirm, false), FileAction::None);
    }

    #[test]
    fn file_dispatch_with_audio_moves_focus() {
        assert_eq!(dispatch_file(Button::Right, true), FileAction::FocusRight);
        assert_eq!(dispatch_file(Button::Left, true), FileAction::FocusLeft);
        assert_eq!(dispatch_file(Button::Down, true), FileAction::FocusDown);
        assert_eq!(dispatch_file(Button::Up, true), FileAction::FocusUp);
        assert_eq!(
            dispatch_file(Button::Confirm, true),
            FileAction::ActivateControl
        );
        assert_eq!(dispatch_file(Button::Back, true), FileAction::Close);
    }

    #[test]
    fn leaf_under_scroll_filetype_opens_viewer() {
        let d = scroll_text_descriptor();
        let r = resolve_activate(&d, &d.items[1]);
        assert_eq!(
            r,
            Resolution::OpenViewer {
                label: "a.txt".into(),
                kind: FileKind::Text
            }
        );
    }

    #[test]
    fn return_without_own_target_uses_descriptor_return() {
        let d = scroll_text_descriptor();
        let r = resolve_activate(&d, &d.items[0]);
        assert_eq!(r, Resolution::NavigateExternal("index.html".into()));
    }

    #[test]
    fn return_item_target_overrides() {
        let mut d = scroll_text_descriptor();
        d.items[0].target = Some("db/other.json".into());
        let r = resolve_activate(&d, &d.items[0].clone());
        assert_eq!(r, Resolution::LoadMenu("db/other.json".into()));
    }

    #[test]
    fn return_falls_back_to_home() {
        let mut d = scroll_text_descriptor();
        d.return_target = None;
        let r = resolve_activate(&d, &d.items[0].clone());
        assert_eq!(r, Resolution::NavigateExternal(DEFAULT_HOME.into()));
    }

    #[test]
    fn json_target_enters_submenu() {
        let mut d = scroll_text_descriptor();
        d.items[1].target = Some("db/music.json".into());
        let r = resolve_activate(&d, &d.items[1].clone());
        assert_eq!(r, Resolution::LoadMenu("db/music.json".into()));
    }

    #[test]
    fn non_json_target_on_leaf_still_opens_viewer() {
        // Only JSON targets divert; other targets on plain items fall
        // through to the viewer rule.
        let mut d = scroll_text_descriptor();
        d.items[1].target = Some("somewhere.html".into());
        let r = resolve_activate(&d, &d.items[1].clone());
        assert!(matches!(r, Resolution::OpenViewer { .. }));
    }

    #[test]
    fn no_filetype_means_noop() {
        let mut d = scroll_text_descriptor();
        d.filetype = None;
        let r = resolve_activate(&d, &d.items[1].clone());
        assert_eq!(r, Resolution::None);
    }

    #[test]
    fn locked_variant_never_opens_viewer() {
        let mut d = scroll_text_descriptor();
        d.variant = Variant::Locked;
        let r = resolve_activate(&d, &d.items[1].clone());
        assert_eq!(r, Resolution::None);
    }

    #[test]
    fn back_resolution() {
        let d = scroll_text_descriptor();
        assert_eq!(
            resolve_back(&d),
            Resolution::NavigateExternal("index.html".into())
        );
        let mut d2 = d.clone();
        d2.return_target = Some("db/db.json".into());
        assert_eq!(resolve_back(&d2), Resolution::LoadMenu("db/db.json".into()));
        let mut d3 = d;
        d3.return_target = None;
        assert_eq!(
            resolve_back(&d3),
            Resolution::NavigateExternal(DEFAULT_HOME.into())
        );
    }
}
