//! Playback progress / volume bar widget.
//!
//! A horizontal track with a proportional fill and a thumb positioned by
//! percentage of the track's pixel width. Click-to-seek maps a pointer X
//! position back to a fraction of the bar width.

use deck_types::error::Result;

use crate::context::DrawContext;
use crate::layout;
use crate::widget::Widget;

/// A horizontal bar showing a 0.0-1.0 fraction with an optional text label.
pub struct ProgressBar {
    /// Fill fraction (0.0 to 1.0).
    pub value: f32,
    /// Optional centered label (e.g. `0:42 / 3:10` or `120%`).
    pub label: Option<String>,
}

impl ProgressBar {
    /// Create a new bar (value clamped to 0.0-1.0).
    pub fn new(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            label: None,
        }
    }

    /// Fraction of the bar width under pixel `x_rel`, clamped to 0.0-1.0.
    /// Used for click-to-seek and click-to-set-volume.
    pub fn fraction_at(x_rel: i32, width: u32) -> f32 {
        if width == 0 {
            return 0.0;
        }
        (x_rel as f32 / width as f32).clamp(0.0, 1.0)
    }
}

impl Widget for ProgressBar {
    fn measure(&self, _ctx: &DrawContext<'_>, available_w: u32, _available_h: u32) -> (u32, u32) {
        (available_w, 8)
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, x: i32, y: i32, w: u32, h: u32) -> Result<()> {
        let radius = h as u16 / 2;
        // Track.
        ctx.backend
            .fill_rounded_rect(x, y, w, h, radius, ctx.theme.scrollbar_track)?;
        // Fill.
        let fill_w = (w as f32 * self.value) as u32;
        if fill_w > 0 {
            ctx.backend
                .fill_rounded_rect(x, y, fill_w, h, radius, ctx.theme.accent)?;
        }
        // Thumb at the fill edge.
        let thumb_w = 4u32;
        let thumb_x = x + (fill_w.min(w.saturating_sub(thumb_w))) as i32;
        ctx.backend
            .fill_rect(thumb_x, y - 2, thumb_w, h + 4, ctx.theme.text_primary)?;
        // Label.
        if let Some(label) = &self.label {
            let fs = ctx.theme.font_size_sm;
            let tw = ctx.backend.measure_text(label, fs);
            let tx = x + layout::center(w, tw);
            let ty = y + h as i32 + ctx.theme.spacing_sm as i32;
            ctx.backend
                .draw_text(label, tx, ty, fs, ctx.theme.text_secondary)?;
        }
        Ok(())
    }
}
