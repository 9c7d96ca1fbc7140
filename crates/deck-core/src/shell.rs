//! The shell controller.
//!
//! Owns the menu state machine, the optional file viewer, and the sound
//! cues, and turns platform input events into state changes. All I/O goes
//! through the `Vfs` and backend traits handed in per call; navigation out
//! of the shell surfaces as a [`ShellEvent`] for the host to act on.

use std::time::Instant;

use deck_audio::cues::{CueKind, CuePlayer};
use deck_audio::SurfaceEvent;
use deck_types::backend::{AudioBackend, SdiBackend};
use deck_types::config::DeckConfig;
use deck_types::error::Result;
use deck_types::input::{Button, InputEvent};
use deck_ui::{DrawContext, Theme};
use deck_vfs::Vfs;

use crate::autoload;
use crate::descriptor::MenuDescriptor;
use crate::menu::{MenuState, MoveOutcome};
use crate::nav::{
    self, dispatch_file, dispatch_menu, FileAction, MenuAction, Mode, Resolution,
};
use crate::viewer::{self, FileViewer};

/// Gap between the screen edge and the menu/viewer panel.
const PANEL_MARGIN: i32 = 16;

/// What the host loop must act on after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// Nothing; keep running.
    None,
    /// Leave the shell for this target (a menu return or back navigation
    /// that points outside the descriptor tree).
    Navigate(String),
    /// The user asked to quit.
    Quit,
}

/// The navigation shell: one active menu, at most one open viewer.
pub struct Shell {
    config: DeckConfig,
    theme: Theme,
    cues: CuePlayer,
    descriptor: MenuDescriptor,
    menu: MenuState,
    menu_path: String,
    mode: Mode,
    viewer: Option<FileViewer>,
}

impl Shell {
    /// Boot the shell on an entry descriptor. Cue clips load best-effort;
    /// a missing entry descriptor is fatal. Entering anywhere other than
    /// the home menu plays the page-load cue once.
    pub fn boot(
        vfs: &dyn Vfs,
        audio: &mut dyn AudioBackend,
        config: DeckConfig,
        entry: Option<&str>,
    ) -> Result<Self> {
        let mut cues = CuePlayer::new();
        for (kind, path) in [
            (CueKind::Move, config.move_cue.as_str()),
            (CueKind::Activate, config.activate_cue.as_str()),
            (CueKind::PageLoad, config.page_load_cue.as_str()),
        ] {
            match vfs.read(path) {
                Ok(data) => cues.set_clip(kind, data),
                Err(e) => log::warn!("cue clip {path} unavailable: {e}"),
            }
        }

        let menu_path = entry.unwrap_or(config.entry_menu.as_str()).to_string();
        let text = vfs.read_to_string(&menu_path)?;
        let descriptor = MenuDescriptor::parse(&text)?;
        let items = autoload::resolve_items(vfs, &config.base_path, &config.manifest_name, &descriptor);
        let menu = MenuState::new(items, descriptor.variant);

        if !config.is_home_menu(&menu_path) {
            cues.play(audio, CueKind::PageLoad);
        }

        Ok(Self {
            config,
            theme: Theme::dark(),
            cues,
            descriptor,
            menu,
            menu_path,
            mode: Mode::Menu,
            viewer: None,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn menu_path(&self) -> &str {
        &self.menu_path
    }

    pub fn viewer(&self) -> Option<&FileViewer> {
        self.viewer.as_ref()
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Fetch and parse a descriptor, replacing the current menu. Selection
    /// resets to the top.
    fn load_menu(&mut self, vfs: &dyn Vfs, path: &str) -> Result<()> {
        let text = vfs.read_to_string(path)?;
        let descriptor = MenuDescriptor::parse(&text)?;
        let items = autoload::resolve_items(
            vfs,
            &self.config.base_path,
            &self.config.manifest_name,
            &descriptor,
        );
        self.menu = MenuState::new(items, descriptor.variant);
        self.descriptor = descriptor;
        self.menu_path = path.to_string();
        Ok(())
    }

    /// Follow a resolved navigation target. A failed descriptor fetch falls
    /// back to leaving for the home target so navigation never dead-ends.
    fn follow(
        &mut self,
        vfs: &dyn Vfs,
        resolution: Resolution,
        render: &mut dyn SdiBackend,
        audio: &mut dyn AudioBackend,
    ) -> Result<ShellEvent> {
        match resolution {
            Resolution::LoadMenu(path) => {
                if let Err(e) = self.load_menu(vfs, &path) {
                    log::warn!("menu load failed for {path}: {e}");
                    return Ok(ShellEvent::Navigate(self.config.home_target.clone()));
                }
                Ok(ShellEvent::None)
            },
            Resolution::NavigateExternal(target) => Ok(ShellEvent::Navigate(target)),
            Resolution::OpenViewer { label, kind } => {
                self.viewer = Some(FileViewer::open(
                    vfs,
                    render,
                    audio,
                    &self.config.base_path,
                    self.descriptor.folder.as_deref(),
                    &label,
                    kind,
                ));
                self.mode = Mode::File;
                Ok(ShellEvent::None)
            },
            Resolution::None => Ok(ShellEvent::None),
        }
    }

    fn handle_menu_button(
        &mut self,
        vfs: &dyn Vfs,
        render: &mut dyn SdiBackend,
        audio: &mut dyn AudioBackend,
        button: Button,
    ) -> Result<ShellEvent> {
        match dispatch_menu(button) {
            MenuAction::MoveDown => {
                if self.menu.move_down() == MoveOutcome::Moved {
                    self.cues.play(audio, CueKind::Move);
                }
                Ok(ShellEvent::None)
            },
            MenuAction::MoveUp => {
                if self.menu.move_up() == MoveOutcome::Moved {
                    self.cues.play(audio, CueKind::Move);
                }
                Ok(ShellEvent::None)
            },
            MenuAction::Activate => {
                let Some(item) = self.menu.selected_item().cloned() else {
                    return Ok(ShellEvent::None);
                };
                // The cue marks the keypress, not the outcome: it plays
                // even when activation resolves to nothing.
                self.cues.play(audio, CueKind::Activate);
                let resolution = nav::resolve_activate(&self.descriptor, &item);
                self.follow(vfs, resolution, render, audio)
            },
            MenuAction::Back => {
                self.cues.play(audio, CueKind::Activate);
                let resolution = nav::resolve_back(&self.descriptor);
                self.follow(vfs, resolution, render, audio)
            },
            MenuAction::None => Ok(ShellEvent::None),
        }
    }

    /// Tear down the viewer and return to the menu. Autoloaded menus
    /// re-resolve their manifest on the way back; the selection is clamped,
    /// not reset, so a shrunken list keeps the user near their place.
    fn close_viewer(
        &mut self,
        vfs: &dyn Vfs,
        render: &mut dyn SdiBackend,
        audio: &mut dyn AudioBackend,
    ) {
        if let Some(mut viewer) = self.viewer.take() {
            viewer.close(render, audio);
        }
        self.mode = Mode::Menu;
        if self.descriptor.autoload {
            let items = autoload::resolve_items(
                vfs,
                &self.config.base_path,
                &self.config.manifest_name,
                &self.descriptor,
            );
            self.menu.replace_items(items);
        }
        self.cues.play(audio, CueKind::Activate);
    }

    /// Save a copy of the open audio track under `exports/`.
    fn export_track(&self, vfs: &mut dyn Vfs) -> Result<()> {
        let Some(viewer) = self.viewer.as_ref() else {
            return Ok(());
        };
        let Some(data) = viewer.payload() else {
            return Ok(());
        };
        let path = format!("exports/{}", viewer.label());
        let data = data.to_vec();
        vfs.write(&path, &data)?;
        log::info!("saved track copy to {path}");
        Ok(())
    }

    fn handle_file_button(
        &mut self,
        vfs: &mut dyn Vfs,
        render: &mut dyn SdiBackend,
        audio: &mut dyn AudioBackend,
        button: Button,
        now: Instant,
    ) -> Result<ShellEvent> {
        let has_audio = self.viewer.as_ref().is_some_and(FileViewer::has_audio);
        let action = dispatch_file(button, has_audio);
        if action == FileAction::Close {
            self.close_viewer(&*vfs, render, audio);
            return Ok(ShellEvent::None);
        }
        let Some(viewer) = self.viewer.as_mut() else {
            return Ok(ShellEvent::None);
        };
        match action {
            FileAction::ScrollDown => viewer.scroll_step(true),
            FileAction::ScrollUp => viewer.scroll_step(false),
            FileAction::FocusRight => {
                if let Some(s) = viewer.surface_mut() {
                    s.focus_right();
                }
            },
            FileAction::FocusLeft => {
                if let Some(s) = viewer.surface_mut() {
                    s.focus_left();
                }
            },
            FileAction::FocusDown => {
                if let Some(s) = viewer.surface_mut() {
                    s.focus_down();
                }
            },
            FileAction::FocusUp => {
                if let Some(s) = viewer.surface_mut() {
                    s.focus_up();
                }
            },
            FileAction::ActivateControl => {
                let event = match viewer.surface_mut() {
                    Some(s) => s.activate_focused(audio, now)?,
                    None => SurfaceEvent::None,
                };
                if event == SurfaceEvent::Export {
                    self.export_track(vfs)?;
                }
            },
            FileAction::Close | FileAction::None => {},
        }
        Ok(ShellEvent::None)
    }

    /// Viewer panel rectangle.
    fn viewer_rect(&self) -> (i32, i32, u32, u32) {
        (
            PANEL_MARGIN,
            PANEL_MARGIN,
            self.config
                .screen_width
                .saturating_sub(PANEL_MARGIN as u32 * 2),
            self.config
                .screen_height
                .saturating_sub(PANEL_MARGIN as u32 * 2),
        )
    }

    /// Content rectangle inside the viewer panel; mirrors the viewer's own
    /// draw layout.
    fn content_rect(&self) -> (i32, i32, u32, u32) {
        let (vx, vy, vw, vh) = self.viewer_rect();
        let pad = self.theme.spacing_md as u32;
        (
            vx + pad as i32,
            vy + viewer::HEADER_HEIGHT as i32,
            vw.saturating_sub(pad * 2 + viewer::SCROLLBAR_WIDTH),
            vh.saturating_sub(viewer::HEADER_HEIGHT),
        )
    }

    fn in_scrollbar(&self, x: i32, y: i32) -> bool {
        let (vx, vy, vw, vh) = self.viewer_rect();
        let track_x = vx + vw as i32 - viewer::SCROLLBAR_WIDTH as i32;
        let track_top = vy + viewer::HEADER_HEIGHT as i32;
        x >= track_x && x < vx + vw as i32 && y >= track_top && y < vy + vh as i32
    }

    fn pointer_move(&mut self, x: i32, y: i32) {
        let (cx, cy, cw, ch) = self.content_rect();
        let surface_y = cy + self.theme.spacing_md as i32;
        let Some(viewer) = self.viewer.as_mut() else {
            return;
        };
        if viewer.dragging {
            viewer.drag_to(y - cy, ch);
            return;
        }
        if viewer.has_audio() {
            let hit = viewer
                .surface()
                .and_then(|s| s.button_hit(x - cx, y - surface_y, cw));
            if let Some(s) = viewer.surface_mut() {
                s.pointer_hover(hit);
            }
        }
    }

    fn pointer_down(
        &mut self,
        vfs: &mut dyn Vfs,
        audio: &mut dyn AudioBackend,
        x: i32,
        y: i32,
        now: Instant,
    ) -> Result<ShellEvent> {
        let (cx, cy, cw, ch) = self.content_rect();
        let surface_y = cy + self.theme.spacing_md as i32;
        let on_scrollbar = self.in_scrollbar(x, y);
        let Some(viewer) = self.viewer.as_mut() else {
            return Ok(ShellEvent::None);
        };
        if on_scrollbar && !viewer.has_audio() {
            viewer.dragging = true;
            viewer.drag_to(y - cy, ch);
            return Ok(ShellEvent::None);
        }
        let event = match viewer.surface_mut() {
            Some(s) => s.pointer_press(audio, x - cx, y - surface_y, cw, now)?,
            None => SurfaceEvent::None,
        };
        if event == SurfaceEvent::Export {
            self.export_track(vfs)?;
        }
        Ok(ShellEvent::None)
    }

    /// Feed one input event through the shell.
    pub fn handle_event(
        &mut self,
        vfs: &mut dyn Vfs,
        render: &mut dyn SdiBackend,
        audio: &mut dyn AudioBackend,
        event: &InputEvent,
        now: Instant,
    ) -> Result<ShellEvent> {
        match event {
            InputEvent::ButtonPress(button) => match self.mode {
                Mode::Menu => self.handle_menu_button(&*vfs, render, audio, *button),
                Mode::File => self.handle_file_button(vfs, render, audio, *button, now),
            },
            InputEvent::CursorMove { x, y } => {
                if self.mode == Mode::File {
                    self.pointer_move(*x, *y);
                }
                Ok(ShellEvent::None)
            },
            InputEvent::PointerDown { x, y } => {
                if self.mode == Mode::File {
                    self.pointer_down(vfs, audio, *x, *y, now)
                } else {
                    Ok(ShellEvent::None)
                }
            },
            InputEvent::PointerRelease { .. } => {
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.dragging = false;
                }
                Ok(ShellEvent::None)
            },
            InputEvent::Quit => Ok(ShellEvent::Quit),
            InputEvent::ButtonRelease(_) | InputEvent::FocusGained | InputEvent::FocusLost => {
                Ok(ShellEvent::None)
            },
        }
    }

    /// Per-frame update: drives the audio surface's poll/finish handling.
    pub fn tick(&mut self, audio: &mut dyn AudioBackend, now: Instant) {
        if let Some(surface) = self.viewer.as_mut().and_then(FileViewer::surface_mut) {
            surface.tick(audio, now);
        }
    }

    /// Draw the current frame.
    pub fn draw(&mut self, render: &mut dyn SdiBackend) -> Result<()> {
        render.clear(self.theme.background)?;
        let (vx, vy, vw, vh) = self.viewer_rect();
        let theme = &self.theme;
        let mut ctx = DrawContext::new(render, theme);
        match self.mode {
            Mode::Menu => self.menu.draw(&mut ctx, vx, vy, vw, vh),
            Mode::File => match self.viewer.as_mut() {
                Some(viewer) => viewer.draw(&mut ctx, vx, vy, vw, vh),
                None => Ok(()),
            },
        }
    }
}
