//! Control-surface button widget.
//!
//! Buttons on the audio surface carry three independent cues at once: the
//! pointer can hover one button while keyboard focus sits on another, and an
//! engaged control (the playing toggle, the selected speed) stays visually
//! active regardless of either.

use deck_types::backend::Color;
use deck_types::error::Result;

use crate::context::DrawContext;
use crate::layout::{self, Padding};
use crate::widget::Widget;

/// A control button with independent hover / keyboard-focus / active cues.
pub struct ControlButton {
    /// Button text label.
    pub label: String,
    /// Pointer is over the button.
    pub hover: bool,
    /// Button holds keyboard focus (arrow-key navigation).
    pub focused: bool,
    /// Button's control is engaged (playing, selected speed).
    pub active: bool,
    /// Internal padding around label.
    pub padding: Padding,
}

impl ControlButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hover: false,
            focused: false,
            active: false,
            padding: Padding::symmetric(8, 4),
        }
    }

    fn bg_color(&self, theme: &crate::theme::Theme) -> Color {
        if self.active {
            theme.button_bg_active
        } else if self.hover {
            theme.button_bg_hover
        } else {
            theme.button_bg
        }
    }

    fn border_color(&self, theme: &crate::theme::Theme) -> Color {
        if self.focused {
            theme.button_border_focus
        } else {
            theme.button_border
        }
    }
}

impl Widget for ControlButton {
    fn measure(&self, ctx: &DrawContext<'_>, _available_w: u32, _available_h: u32) -> (u32, u32) {
        let fs = ctx.theme.font_size_md;
        let text_w = ctx.backend.measure_text(&self.label, fs);
        let text_h = ctx.backend.measure_text_height(fs);
        (
            text_w + self.padding.horizontal(),
            text_h + self.padding.vertical(),
        )
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, x: i32, y: i32, w: u32, h: u32) -> Result<()> {
        let radius = ctx.theme.border_radius_sm;
        let bg = self.bg_color(ctx.theme);
        let border = self.border_color(ctx.theme);
        ctx.backend.fill_rounded_rect(x, y, w, h, radius, bg)?;
        ctx.backend.stroke_rounded_rect(x, y, w, h, radius, 1, border)?;

        let fs = ctx.theme.font_size_md;
        let text_w = ctx.backend.measure_text(&self.label, fs);
        let text_h = ctx.backend.measure_text_height(fs);
        let tx = x + layout::center(w, text_w);
        let ty = y + layout::center(h, text_h);
        let color = if self.active {
            ctx.theme.accent
        } else {
            ctx.theme.text_primary
        };
        ctx.backend.draw_text(&self.label, tx, ty, fs, color)?;
        Ok(())
    }
}
