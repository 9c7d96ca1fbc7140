//! The audio control surface.
//!
//! Owns playback state for one loaded track: a play/pause toggle, stop,
//! seek by five seconds, click-to-seek on the progress bar, a 0-200%
//! volume with the backend's gain path preferred over the plain volume
//! clamp, and exclusive speed selection. Keyboard focus over the twelve
//! control buttons goes through [`FocusGrid`]; pointer hover clears it.

use std::time::Instant;

use deck_types::backend::AudioBackend;
use deck_types::error::Result;
use deck_ui::button::ControlButton;
use deck_ui::layout;
use deck_ui::progress_bar::ProgressBar;
use deck_ui::widget::Widget;
use deck_ui::DrawContext;

use crate::grid::FocusGrid;
use crate::poller::ProgressPoller;

/// Selectable playback rates. Exactly one is active at a time.
pub const SPEEDS: [f32; 5] = [0.5, 1.0, 1.5, 2.0, 4.0];
/// Volume adjustment step.
pub const VOLUME_STEP: f32 = 0.2;
/// Upper volume bound (200%).
pub const VOLUME_MAX: f32 = 2.0;
/// Seek distance for the rewind/forward buttons.
pub const SEEK_STEP_MS: u64 = 5_000;

/// Number of control buttons: six per row, two rows.
pub const BUTTON_COUNT: usize = 12;

/// Height of one button row in pixels, used by draw and hit-testing.
const ROW_HEIGHT: u32 = 24;
/// Vertical gap between surface rows.
const ROW_GAP: u32 = 6;
/// Horizontal gap between buttons.
const BUTTON_GAP: u32 = 2;
/// Height of the progress/volume bar row.
const BAR_HEIGHT: u32 = 8;

/// The control a button index maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceButton {
    Play,
    Rewind,
    Forward,
    Stop,
    VolDown,
    VolUp,
    Download,
    /// Index into [`SPEEDS`].
    Speed(usize),
}

/// Row 1: play/rewind/forward/stop/voldown/volup.
/// Row 2: download then the five speeds.
pub fn button_at(index: usize) -> Option<SurfaceButton> {
    match index {
        0 => Some(SurfaceButton::Play),
        1 => Some(SurfaceButton::Rewind),
        2 => Some(SurfaceButton::Forward),
        3 => Some(SurfaceButton::Stop),
        4 => Some(SurfaceButton::VolDown),
        5 => Some(SurfaceButton::VolUp),
        6 => Some(SurfaceButton::Download),
        7..=11 => Some(SurfaceButton::Speed(index - 7)),
        _ => None,
    }
}

/// Outcome of a surface interaction that the shell must act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Nothing beyond internal state changed.
    None,
    /// The download button was activated; the shell saves a copy of the
    /// track.
    Export,
}

/// Playback state and focus for one audio payload.
pub struct AudioSurface {
    track: deck_types::backend::AudioTrackId,
    playing: bool,
    volume: f32,
    speed: f32,
    gain_available: bool,
    grid: FocusGrid,
    hover: Option<usize>,
    poller: ProgressPoller,
    progress: f32,
    position_ms: u64,
    duration_ms: u64,
}

/// Round to two decimals, matching the step arithmetic of the volume
/// buttons (0.2 steps accumulate float error otherwise).
fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}

fn format_time(ms: u64) -> String {
    let total_s = ms / 1000;
    format!("{}:{:02}", total_s / 60, total_s % 60)
}

impl AudioSurface {
    /// Load the track and initialize playback state: paused, volume 100%,
    /// speed 1x.
    pub fn open(backend: &mut dyn AudioBackend, data: &[u8]) -> Result<Self> {
        let track = backend.load_track(data)?;
        backend.set_rate(1.0)?;
        let mut surface = Self {
            track,
            playing: false,
            volume: 1.0,
            speed: 1.0,
            gain_available: true,
            grid: FocusGrid::new(BUTTON_COUNT),
            hover: None,
            poller: ProgressPoller::new(),
            progress: 0.0,
            position_ms: 0,
            duration_ms: backend.duration_ms(),
        };
        surface.apply_volume(backend)?;
        surface.refresh_progress(backend);
        Ok(surface)
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Cached progress fraction (0.0-1.0), refreshed by poll ticks.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn focused_button(&self) -> Option<usize> {
        self.grid.focused()
    }

    pub fn poller_active(&self) -> bool {
        self.poller.active()
    }

    /// Apply the current volume. The gain path carries the full 0-2 range;
    /// when unavailable the plain path takes over, capped at 1.0.
    fn apply_volume(&mut self, backend: &mut dyn AudioBackend) -> Result<()> {
        if self.gain_available {
            match backend.set_gain(self.volume) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    log::warn!("gain path unavailable, falling back to plain volume: {e}");
                    self.gain_available = false;
                },
            }
        }
        backend.set_volume(self.volume.min(1.0))
    }

    fn refresh_progress(&mut self, backend: &dyn AudioBackend) {
        self.position_ms = backend.position_ms();
        self.duration_ms = backend.duration_ms();
        self.progress = if self.duration_ms > 0 {
            (self.position_ms as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Toggle play/pause. Polling starts with playback and is cancelled
    /// with pause.
    pub fn toggle_play(&mut self, backend: &mut dyn AudioBackend, now: Instant) -> Result<()> {
        if self.playing {
            backend.pause()?;
            self.playing = false;
            self.poller.cancel();
        } else {
            backend.play(self.track)?;
            self.playing = true;
            self.poller.start(now);
        }
        self.refresh_progress(backend);
        Ok(())
    }

    /// Stop playback and reset to the beginning.
    pub fn stop(&mut self, backend: &mut dyn AudioBackend) -> Result<()> {
        backend.stop()?;
        self.playing = false;
        self.poller.cancel();
        self.refresh_progress(backend);
        Ok(())
    }

    /// Seek relative to the current position, clamped to the track bounds.
    pub fn seek_by(&mut self, backend: &mut dyn AudioBackend, delta_ms: i64) -> Result<()> {
        let pos = backend.position_ms() as i64;
        let target = (pos + delta_ms).clamp(0, backend.duration_ms() as i64) as u64;
        backend.seek_ms(target)?;
        self.refresh_progress(backend);
        Ok(())
    }

    /// Seek to a fraction of the track (progress bar click).
    pub fn seek_fraction(&mut self, backend: &mut dyn AudioBackend, fraction: f32) -> Result<()> {
        let f = fraction.clamp(0.0, 1.0);
        let target = (backend.duration_ms() as f64 * f as f64) as u64;
        backend.seek_ms(target)?;
        self.refresh_progress(backend);
        Ok(())
    }

    /// Step the volume down by 0.2, never below 0.
    pub fn volume_down(&mut self, backend: &mut dyn AudioBackend) -> Result<()> {
        self.volume = round2(self.volume - VOLUME_STEP).max(0.0);
        self.apply_volume(backend)
    }

    /// Step the volume up by 0.2, never above 2.0.
    pub fn volume_up(&mut self, backend: &mut dyn AudioBackend) -> Result<()> {
        self.volume = round2(self.volume + VOLUME_STEP).min(VOLUME_MAX);
        self.apply_volume(backend)
    }

    /// Set the volume from a bar-click fraction (0.0-1.0 maps to 0-200%).
    pub fn set_volume_fraction(
        &mut self,
        backend: &mut dyn AudioBackend,
        fraction: f32,
    ) -> Result<()> {
        self.volume = (fraction * VOLUME_MAX).clamp(0.0, VOLUME_MAX);
        self.apply_volume(backend)
    }

    /// Select a playback speed; the previous selection deactivates.
    pub fn select_speed(&mut self, backend: &mut dyn AudioBackend, index: usize) -> Result<()> {
        if let Some(&speed) = SPEEDS.get(index) {
            backend.set_rate(speed)?;
            self.speed = speed;
        }
        Ok(())
    }

    /// Move keyboard focus.
    pub fn focus_right(&mut self) {
        self.grid.right();
    }

    pub fn focus_left(&mut self) {
        self.grid.left();
    }

    pub fn focus_down(&mut self) {
        self.grid.down();
    }

    pub fn focus_up(&mut self) {
        self.grid.up();
    }

    /// Pointer hover takes precedence over keyboard state.
    pub fn pointer_hover(&mut self, button: Option<usize>) {
        self.hover = button;
        if button.is_some() {
            self.grid.clear();
        }
    }

    /// Activate the keyboard-focused button, if any.
    pub fn activate_focused(
        &mut self,
        backend: &mut dyn AudioBackend,
        now: Instant,
    ) -> Result<SurfaceEvent> {
        match self.grid.focused() {
            Some(index) => self.activate(backend, index, now),
            None => Ok(SurfaceEvent::None),
        }
    }

    /// Activate a button by index (keyboard Enter or pointer click).
    pub fn activate(
        &mut self,
        backend: &mut dyn AudioBackend,
        index: usize,
        now: Instant,
    ) -> Result<SurfaceEvent> {
        let Some(button) = button_at(index) else {
            return Ok(SurfaceEvent::None);
        };
        match button {
            SurfaceButton::Play => self.toggle_play(backend, now)?,
            SurfaceButton::Rewind => self.seek_by(backend, -(SEEK_STEP_MS as i64))?,
            SurfaceButton::Forward => self.seek_by(backend, SEEK_STEP_MS as i64)?,
            SurfaceButton::Stop => self.stop(backend)?,
            SurfaceButton::VolDown => self.volume_down(backend)?,
            SurfaceButton::VolUp => self.volume_up(backend)?,
            SurfaceButton::Download => return Ok(SurfaceEvent::Export),
            SurfaceButton::Speed(i) => self.select_speed(backend, i)?,
        }
        Ok(SurfaceEvent::None)
    }

    /// Per-frame update: sync with the backend's own playback state (a
    /// track ending naturally must flip the play button back) and refresh
    /// the progress display on poll ticks.
    pub fn tick(&mut self, backend: &mut dyn AudioBackend, now: Instant) {
        if self.playing && (backend.finished() || !backend.is_playing()) {
            self.playing = false;
            self.poller.cancel();
            self.refresh_progress(backend);
            return;
        }
        if self.poller.tick(now) {
            self.refresh_progress(backend);
        }
    }

    /// Tear down playback. Cancels polling and releases the track.
    pub fn close(&mut self, backend: &mut dyn AudioBackend) -> Result<()> {
        self.poller.cancel();
        self.playing = false;
        backend.stop()?;
        backend.unload_track(self.track)
    }

    /// Whether a button renders as engaged.
    fn button_active(&self, button: SurfaceButton) -> bool {
        match button {
            SurfaceButton::Play => self.playing,
            SurfaceButton::Speed(i) => {
                SPEEDS
                    .get(i)
                    .is_some_and(|s| (*s - self.speed).abs() < f32::EPSILON)
            },
            _ => false,
        }
    }

    fn button_label(&self, button: SurfaceButton) -> String {
        match button {
            SurfaceButton::Play => {
                if self.playing {
                    "PAUSE".to_string()
                } else {
                    "PLAY".to_string()
                }
            },
            SurfaceButton::Rewind => "-5S".to_string(),
            SurfaceButton::Forward => "+5S".to_string(),
            SurfaceButton::Stop => "STOP".to_string(),
            SurfaceButton::VolDown => "VOL-".to_string(),
            SurfaceButton::VolUp => "VOL+".to_string(),
            SurfaceButton::Download => "SAVE".to_string(),
            SurfaceButton::Speed(i) => format!("{}x", SPEEDS[i]),
        }
    }

    /// Button index under a surface-local pointer position, if any. Uses
    /// the same layout math as [`draw`](Self::draw).
    pub fn button_hit(&self, x_rel: i32, y_rel: i32, w: u32) -> Option<usize> {
        let rows_top = (BAR_HEIGHT + ROW_GAP) as i32 * 2;
        if y_rel < rows_top {
            return None;
        }
        let row = (y_rel - rows_top) / (ROW_HEIGHT + ROW_GAP) as i32;
        let within_row = (y_rel - rows_top) % (ROW_HEIGHT + ROW_GAP) as i32;
        if !(0..2).contains(&row) || within_row >= ROW_HEIGHT as i32 {
            return None;
        }
        let (item_w, _) = layout::distribute(w, 6, BUTTON_GAP);
        let col = layout::hit_index(x_rel, item_w, BUTTON_GAP, 6)?;
        Some(row as usize * 6 + col)
    }

    /// Handle a pointer press in surface-local coordinates. Clicks on the
    /// progress bar seek to that fraction, clicks on the volume bar set the
    /// volume, clicks on a button activate it.
    pub fn pointer_press(
        &mut self,
        backend: &mut dyn AudioBackend,
        x_rel: i32,
        y_rel: i32,
        w: u32,
        now: Instant,
    ) -> Result<SurfaceEvent> {
        if x_rel < 0 || x_rel >= w as i32 || y_rel < 0 {
            return Ok(SurfaceEvent::None);
        }
        if y_rel < BAR_HEIGHT as i32 {
            let f = ProgressBar::fraction_at(x_rel, w);
            self.seek_fraction(backend, f)?;
            return Ok(SurfaceEvent::None);
        }
        let vol_top = (BAR_HEIGHT + ROW_GAP) as i32;
        if (vol_top..vol_top + BAR_HEIGHT as i32).contains(&y_rel) {
            let f = ProgressBar::fraction_at(x_rel, w);
            self.set_volume_fraction(backend, f)?;
            return Ok(SurfaceEvent::None);
        }
        match self.button_hit(x_rel, y_rel, w) {
            Some(index) => self.activate(backend, index, now),
            None => Ok(SurfaceEvent::None),
        }
    }

    /// Draw the surface: progress bar, volume bar, and the two button rows.
    pub fn draw(&self, ctx: &mut DrawContext<'_>, x: i32, y: i32, w: u32) -> Result<()> {
        let mut cy = y;

        let mut progress = ProgressBar::new(self.progress);
        progress.label = Some(format!(
            "{} / {}",
            format_time(self.position_ms),
            format_time(self.duration_ms)
        ));
        progress.draw(ctx, x, cy, w, BAR_HEIGHT)?;
        cy += (BAR_HEIGHT + ROW_GAP) as i32;

        let mut volume = ProgressBar::new(self.volume / VOLUME_MAX);
        volume.label = Some(format!("{}%", (self.volume * 100.0).round() as u32));
        volume.draw(ctx, x, cy, w, BAR_HEIGHT)?;
        cy += (BAR_HEIGHT + ROW_GAP) as i32;

        let (item_w, positions) = layout::distribute(w, 6, BUTTON_GAP);
        for index in 0..BUTTON_COUNT {
            let Some(button) = button_at(index) else {
                continue;
            };
            let row = index / 6;
            let col = index % 6;
            let mut widget = ControlButton::new(self.button_label(button));
            widget.active = self.button_active(button);
            widget.focused = self.grid.focused() == Some(index);
            widget.hover = self.hover == Some(index);
            let bx = x + positions[col];
            let by = cy + row as i32 * (ROW_HEIGHT + ROW_GAP) as i32;
            widget.draw(ctx, bx, by, item_w, ROW_HEIGHT)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{AudioOp, MockAudioBackend};
    use proptest::prelude::*;

    fn open_surface(backend: &mut MockAudioBackend) -> AudioSurface {
        AudioSurface::open(backend, &[0u8; 16]).unwrap()
    }

    #[test]
    fn open_defaults() {
        let mut backend = MockAudioBackend::new();
        let s = open_surface(&mut backend);
        assert!(!s.is_playing());
        assert!((s.volume() - 1.0).abs() < f32::EPSILON);
        assert!((s.speed() - 1.0).abs() < f32::EPSILON);
        assert_eq!(s.focused_button(), None);
        // Initial volume goes out over the gain path.
        assert_eq!(backend.gains(), vec![1.0]);
    }

    #[test]
    fn toggle_play_starts_polling() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        let now = Instant::now();
        s.toggle_play(&mut backend, now).unwrap();
        assert!(s.is_playing());
        assert!(s.poller_active());
        s.toggle_play(&mut backend, now).unwrap();
        assert!(!s.is_playing());
        assert!(!s.poller_active());
        assert!(backend.ops.contains(&AudioOp::Pause));
    }

    #[test]
    fn stop_resets_and_cancels_polling() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        let now = Instant::now();
        s.toggle_play(&mut backend, now).unwrap();
        backend.position_ms = 42_000;
        s.stop(&mut backend).unwrap();
        assert!(!s.is_playing());
        assert!(!s.poller_active());
        assert_eq!(backend.position_ms, 0);
        assert!((s.progress() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn natural_end_flips_play_state() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        let now = Instant::now();
        s.toggle_play(&mut backend, now).unwrap();
        backend.finish_naturally();
        s.tick(&mut backend, now);
        assert!(!s.is_playing());
        assert!(!s.poller_active());
        assert!((s.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn seek_clamps_at_start_and_end() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        backend.position_ms = 2_000;
        s.seek_by(&mut backend, -(SEEK_STEP_MS as i64)).unwrap();
        assert_eq!(backend.position_ms, 0);
        backend.position_ms = backend.duration_ms - 1_000;
        s.seek_by(&mut backend, SEEK_STEP_MS as i64).unwrap();
        assert_eq!(backend.position_ms, backend.duration_ms);
    }

    #[test]
    fn seek_fraction_maps_to_duration() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        s.seek_fraction(&mut backend, 0.5).unwrap();
        assert_eq!(backend.position_ms, backend.duration_ms / 2);
        s.seek_fraction(&mut backend, 2.0).unwrap();
        assert_eq!(backend.position_ms, backend.duration_ms);
    }

    #[test]
    fn volume_steps_round_cleanly() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        s.volume_down(&mut backend).unwrap();
        assert!((s.volume() - 0.8).abs() < f32::EPSILON);
        s.volume_down(&mut backend).unwrap();
        s.volume_down(&mut backend).unwrap();
        s.volume_down(&mut backend).unwrap();
        // 0.2; three more steps pin at 0 without drifting negative.
        s.volume_down(&mut backend).unwrap();
        s.volume_down(&mut backend).unwrap();
        assert!((s.volume() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn volume_caps_at_two() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        for _ in 0..10 {
            s.volume_up(&mut backend).unwrap();
        }
        assert!((s.volume() - VOLUME_MAX).abs() < f32::EPSILON);
        // Full range reaches the gain path unclamped.
        assert!((backend.gains().last().unwrap() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn gain_failure_falls_back_to_capped_volume() {
        let mut backend = MockAudioBackend::new();
        backend.no_gain = true;
        let mut s = open_surface(&mut backend);
        for _ in 0..5 {
            s.volume_up(&mut backend).unwrap();
        }
        assert!((s.volume() - VOLUME_MAX).abs() < f32::EPSILON);
        // Plain path never exceeds 1.0.
        assert!(backend.gains().is_empty());
        assert!(backend.volumes().iter().all(|v| *v <= 1.0));
        assert!((backend.volumes().last().unwrap() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn volume_bar_click_maps_to_full_range() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        s.set_volume_fraction(&mut backend, 0.75).unwrap();
        assert!((s.volume() - 1.5).abs() < 1e-6);
        s.set_volume_fraction(&mut backend, 0.0).unwrap();
        assert!((s.volume() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn speed_selection_is_exclusive() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        s.select_speed(&mut backend, 4).unwrap();
        assert!((s.speed() - 4.0).abs() < f32::EPSILON);
        assert!(s.button_active(SurfaceButton::Speed(4)));
        let active: Vec<bool> = (0..SPEEDS.len())
            .map(|i| s.button_active(SurfaceButton::Speed(i)))
            .collect();
        assert_eq!(active.iter().filter(|a| **a).count(), 1);
        s.select_speed(&mut backend, 0).unwrap();
        assert!(s.button_active(SurfaceButton::Speed(0)));
        assert!(!s.button_active(SurfaceButton::Speed(4)));
        assert_eq!(backend.rates(), vec![1.0, 4.0, 0.5]);
    }

    #[test]
    fn enter_activates_focused_button() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        let now = Instant::now();
        s.focus_right(); // play button
        let ev = s.activate_focused(&mut backend, now).unwrap();
        assert_eq!(ev, SurfaceEvent::None);
        assert!(s.is_playing());
    }

    #[test]
    fn download_button_emits_export() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        let now = Instant::now();
        let ev = s.activate(&mut backend, 6, now).unwrap();
        assert_eq!(ev, SurfaceEvent::Export);
    }

    #[test]
    fn hover_clears_keyboard_focus() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        s.focus_right();
        assert_eq!(s.focused_button(), Some(0));
        s.pointer_hover(Some(3));
        assert_eq!(s.focused_button(), None);
        // Hover leaving does not restore focus.
        s.pointer_hover(None);
        assert_eq!(s.focused_button(), None);
    }

    #[test]
    fn close_cancels_polling_and_unloads() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        let now = Instant::now();
        s.toggle_play(&mut backend, now).unwrap();
        s.close(&mut backend).unwrap();
        assert!(!s.poller_active());
        assert!(matches!(backend.ops.last(), Some(AudioOp::Unload(_))));
    }

    #[test]
    fn poll_tick_refreshes_progress() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        let t0 = Instant::now();
        s.toggle_play(&mut backend, t0).unwrap();
        backend.position_ms = backend.duration_ms / 4;
        s.tick(&mut backend, t0 + crate::poller::POLL_INTERVAL);
        assert!((s.progress() - 0.25).abs() < 1e-3);
    }

    #[test]
    fn button_hit_matches_rows() {
        let mut b = MockAudioBackend::new();
        let s = open_surface(&mut b);
        let rows_top = ((BAR_HEIGHT + ROW_GAP) * 2) as i32;
        // First button of row 1.
        assert_eq!(s.button_hit(0, rows_top, 610), Some(0));
        // First button of row 2.
        assert_eq!(
            s.button_hit(0, rows_top + (ROW_HEIGHT + ROW_GAP) as i32, 610),
            Some(6)
        );
        // Above the button rows (bars) is no button.
        assert_eq!(s.button_hit(0, 0, 610), None);
    }

    #[test]
    fn pointer_press_maps_bars_and_buttons() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        let now = Instant::now();
        // Half way along the progress bar seeks to the middle.
        s.pointer_press(&mut backend, 305, 0, 610, now).unwrap();
        assert_eq!(backend.position_ms, backend.duration_ms / 2);
        // Half way along the volume bar is 100% of a 0-200% range.
        let vol_y = (BAR_HEIGHT + ROW_GAP) as i32;
        s.pointer_press(&mut backend, 305, vol_y, 610, now).unwrap();
        assert!((s.volume() - 1.0).abs() < 0.02);
        // A click on the first button of row 1 toggles play.
        let rows_top = ((BAR_HEIGHT + ROW_GAP) * 2) as i32;
        let ev = s.pointer_press(&mut backend, 4, rows_top, 610, now).unwrap();
        assert_eq!(ev, SurfaceEvent::None);
        assert!(s.is_playing());
        // Out of bounds does nothing.
        let before = backend.ops.len();
        s.pointer_press(&mut backend, -1, 0, 610, now).unwrap();
        assert_eq!(backend.ops.len(), before);
    }

    #[test]
    fn labels_reflect_play_state() {
        let mut backend = MockAudioBackend::new();
        let mut s = open_surface(&mut backend);
        assert_eq!(s.button_label(SurfaceButton::Play), "PLAY");
        s.toggle_play(&mut backend, Instant::now()).unwrap();
        assert_eq!(s.button_label(SurfaceButton::Play), "PAUSE");
    }

    #[test]
    fn time_formatting() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(62_000), "1:02");
        assert_eq!(format_time(600_000), "10:00");
    }

    proptest! {
        #[test]
        fn volume_always_within_bounds(steps in prop::collection::vec(prop::bool::ANY, 0..64)) {
            let mut backend = MockAudioBackend::new();
            let mut s = open_surface(&mut backend);
            for up in steps {
                if up {
                    s.volume_up(&mut backend).unwrap();
                } else {
                    s.volume_down(&mut backend).unwrap();
                }
                prop_assert!(s.volume() >= 0.0);
                prop_assert!(s.volume() <= VOLUME_MAX);
                // Steps stay on the 0.2 lattice.
                let scaled = s.volume() * 10.0;
                prop_assert!((scaled - scaled.round()).abs() < 1e-4);
            }
        }
    }
}
