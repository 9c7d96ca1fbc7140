//! Backend trait definitions.
//!
//! Every platform implements these traits. The shell dispatches all I/O
//! through trait boundaries -- it never calls platform-specific APIs.
//!
//! `SdiBackend` provides core rendering methods (required) plus extended
//! drawing primitives with default implementations that approximate using
//! the core methods, so simple backends work without overriding them.

use crate::error::{DeckError, Result};
use crate::input::InputEvent;

/// Width in pixels of one glyph in the built-in bitmap font.
pub const BITMAP_GLYPH_WIDTH: u32 = 8;

/// A color in RGBA format (0-255 per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Return the same color with a different alpha value.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
}

/// Opaque handle to a loaded texture in the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Rendering backend trait.
///
/// The shell draws menus, viewers, and the audio control surface through
/// these methods only. The software framebuffer backend implements the
/// whole set; `MockBackend` in deck-ui records calls for tests.
#[allow(clippy::too_many_arguments)]
pub trait SdiBackend {
    /// Initialize the rendering subsystem.
    fn init(&mut self, width: u32, height: u32) -> Result<()>;

    /// Clear the screen to a solid color.
    fn clear(&mut self, color: Color) -> Result<()>;

    /// Blit a texture at the given position and size.
    fn blit(&mut self, tex: TextureId, x: i32, y: i32, w: u32, h: u32) -> Result<()>;

    /// Draw a filled rectangle.
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) -> Result<()>;

    /// Draw text at the given position. `font_size` is a hint in pixels;
    /// backends may approximate.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: u16, color: Color)
    -> Result<()>;

    /// Present the current frame to the display.
    fn swap_buffers(&mut self) -> Result<()>;

    /// Load raw RGBA pixel data as a texture. Returns a handle for later blit.
    fn load_texture(&mut self, width: u32, height: u32, rgba_data: &[u8]) -> Result<TextureId>;

    /// Destroy a previously loaded texture.
    fn destroy_texture(&mut self, tex: TextureId) -> Result<()>;

    /// Set the clipping rectangle (used while drawing viewer content).
    fn set_clip_rect(&mut self, x: i32, y: i32, w: u32, h: u32) -> Result<()>;

    /// Reset clipping to the full screen.
    fn reset_clip_rect(&mut self) -> Result<()>;

    /// Measure the width of a text string at the given font size.
    fn measure_text(&self, text: &str, font_size: u16) -> u32;

    /// Read the current framebuffer as RGBA pixel data.
    fn read_pixels(&self, x: i32, y: i32, w: u32, h: u32) -> Result<Vec<u8>>;

    /// Shut down the rendering subsystem and release resources.
    fn shutdown(&mut self) -> Result<()>;

    // -----------------------------------------------------------------------
    // Extended primitives (optional, with defaults)
    // -----------------------------------------------------------------------

    /// Draw a filled rectangle with rounded corners.
    fn fill_rounded_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        _radius: u16,
        color: Color,
    ) -> Result<()> {
        self.fill_rect(x, y, w, h, color)
    }

    /// Draw the outline of a rectangle. `stroke_width` is drawn inward.
    fn stroke_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        stroke_width: u16,
        color: Color,
    ) -> Result<()> {
        let sw = stroke_width as u32;
        self.fill_rect(x, y, w, sw, color)?;
        self.fill_rect(x, y + h as i32 - sw as i32, w, sw, color)?;
        self.fill_rect(x, y + sw as i32, sw, h.saturating_sub(sw * 2), color)?;
        self.fill_rect(
            x + w as i32 - sw as i32,
            y + sw as i32,
            sw,
            h.saturating_sub(sw * 2),
            color,
        )?;
        Ok(())
    }

    /// Draw the outline of a rounded rectangle.
    fn stroke_rounded_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        _radius: u16,
        stroke_width: u16,
        color: Color,
    ) -> Result<()> {
        self.stroke_rect(x, y, w, h, stroke_width, color)
    }

    /// Measure the height of text at the given font size.
    fn measure_text_height(&self, font_size: u16) -> u32 {
        (font_size as f32 * 1.2) as u32
    }

    /// Draw multiline word-wrapped text within a bounding box.
    ///
    /// Returns the total height used in pixels.
    fn draw_text_wrapped(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font_size: u16,
        color: Color,
        max_width: u32,
        line_height: u32,
    ) -> Result<u32> {
        let lh = if line_height > 0 {
            line_height
        } else {
            self.measure_text_height(font_size)
        };
        let mut cy = y;
        for line in text.split('\n') {
            let words: Vec<&str> = line.split_whitespace().collect();
            if words.is_empty() {
                cy += lh as i32;
                continue;
            }
            let mut current_line = String::new();
            for word in words {
                let test = if current_line.is_empty() {
                    word.to_string()
                } else {
                    format!("{current_line} {word}")
                };
                if self.measure_text(&test, font_size) > max_width && !current_line.is_empty() {
                    self.draw_text(&current_line, x, cy, font_size, color)?;
                    cy += lh as i32;
                    current_line = word.to_string();
                } else {
                    current_line = test;
                }
            }
            if !current_line.is_empty() {
                self.draw_text(&current_line, x, cy, font_size, color)?;
                cy += lh as i32;
            }
        }
        Ok((cy - y) as u32)
    }

    /// Draw text truncated with "..." if it exceeds `max_width`.
    ///
    /// Returns the actual drawn width in pixels.
    fn draw_text_ellipsis(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        font_size: u16,
        color: Color,
        max_width: u32,
    ) -> Result<u32> {
        let text_w = self.measure_text(text, font_size);
        if text_w <= max_width {
            self.draw_text(text, x, y, font_size, color)?;
            return Ok(text_w);
        }
        let ellipsis_w = self.measure_text("...", font_size);
        let target = max_width.saturating_sub(ellipsis_w);
        let mut drawn_w = 0u32;
        let mut end_byte = 0;
        for (i, ch) in text.char_indices() {
            let ch_w = self.measure_text(&text[i..i + ch.len_utf8()], font_size);
            if drawn_w + ch_w > target {
                break;
            }
            drawn_w += ch_w;
            end_byte = i + ch.len_utf8();
        }
        let truncated = format!("{}...", &text[..end_byte]);
        self.draw_text(&truncated, x, y, font_size, color)?;
        Ok(drawn_w + ellipsis_w)
    }

    /// Push a clip rectangle onto the clip stack.
    fn push_clip_rect(&mut self, x: i32, y: i32, w: u32, h: u32) -> Result<()> {
        self.set_clip_rect(x, y, w, h)
    }

    /// Pop the most recently pushed clip rectangle.
    fn pop_clip_rect(&mut self) -> Result<()> {
        self.reset_clip_rect()
    }
}

/// Input backend trait.
///
/// Maps platform-specific input to the platform-agnostic `InputEvent` enum.
pub trait InputBackend {
    /// Poll for pending input events.
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

/// Opaque handle to a loaded audio track in the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioTrackId(pub u64);

/// Audio playback backend trait.
///
/// Drives both the file-viewer track (the control surface) and the short
/// fire-and-forget navigation cues. Volume and gain are separate paths:
/// `set_volume` is the plain output level clamped to `[0, 1]`; `set_gain`
/// is the amplified path reaching up to 2.0, which backends without an
/// amplification stage may reject.
pub trait AudioBackend {
    /// Initialize the audio subsystem (open device, set sample rate).
    fn init(&mut self) -> Result<()>;

    /// Load an audio file from raw bytes (MP3, WAV, OGG).
    /// Returns a handle for playback control.
    fn load_track(&mut self, data: &[u8]) -> Result<AudioTrackId>;

    /// Start playing a loaded track from its current position.
    fn play(&mut self, track: AudioTrackId) -> Result<()>;

    /// Pause the currently playing track.
    fn pause(&mut self) -> Result<()>;

    /// Stop playback and reset position to the beginning.
    fn stop(&mut self) -> Result<()>;

    /// Seek to an absolute position in milliseconds.
    fn seek_ms(&mut self, position: u64) -> Result<()>;

    /// Set the plain volume (0.0 = silent, 1.0 = full). Values above 1.0
    /// are clamped by the backend.
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Set amplified gain (0.0 to 2.0). Backends without an amplification
    /// path return `DeckError::Playback`; callers fall back to `set_volume`.
    fn set_gain(&mut self, gain: f32) -> Result<()> {
        let _ = gain;
        Err(DeckError::Playback("gain path not available".into()))
    }

    /// Set the playback rate (1.0 = normal speed).
    fn set_rate(&mut self, rate: f32) -> Result<()>;

    /// Return `true` if audio is currently playing.
    fn is_playing(&self) -> bool;

    /// Return `true` once the current track has played to its natural end.
    fn finished(&self) -> bool;

    /// Get the current playback position in milliseconds.
    fn position_ms(&self) -> u64;

    /// Get the total duration of the current track in milliseconds.
    /// Returns 0 if no track is loaded or the duration is unknown.
    fn duration_ms(&self) -> u64;

    /// Play a short one-shot clip (navigation cue), fire-and-forget.
    /// Does not disturb the loaded track. `start_ms` skips into the clip;
    /// `volume` is 0.0-1.0; `rate` is the playback rate.
    fn play_oneshot(&mut self, data: &[u8], start_ms: u64, volume: f32, rate: f32) -> Result<()>;

    /// Unload a previously loaded track and free its resources.
    fn unload_track(&mut self, track: AudioTrackId) -> Result<()>;

    /// Shut down the audio subsystem and release all resources.
    fn shutdown(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_rgb_full_alpha() {
        let c = Color::rgb(10, 20, 30);
        assert_eq!(c.a, 255);
    }

    #[test]
    fn color_with_alpha() {
        let c = Color::rgb(1, 2, 3).with_alpha(128);
        assert_eq!(c, Color::rgba(1, 2, 3, 128));
    }

    #[test]
    fn color_constants() {
        assert_eq!(Color::BLACK, Color::rgb(0, 0, 0));
        assert_eq!(Color::WHITE, Color::rgb(255, 255, 255));
        assert_eq!(Color::TRANSPARENT.a, 0);
    }

    #[test]
    fn texture_id_hash_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(TextureId(1));
        set.insert(TextureId(1));
        set.insert(TextureId(2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn audio_track_id_copy() {
        let t = AudioTrackId(7);
        let t2 = t;
        assert_eq!(t, t2);
    }
}
