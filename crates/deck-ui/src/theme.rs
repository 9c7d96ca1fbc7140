//! Theme system for consistent UI styling.

use deck_types::backend::Color;

/// Complete visual theme for the shell.
pub struct Theme {
    /// Main background color.
    pub background: Color,
    /// Viewer pane background color.
    pub viewer_bg: Color,

    /// Primary text color (the selected slot, viewer body text).
    pub text_primary: Color,
    /// Secondary/muted text color (footer hints, timestamps).
    pub text_secondary: Color,
    /// Disabled text color.
    pub text_disabled: Color,

    /// Accent color (headings, active controls).
    pub accent: Color,
    /// Error text color (load failures shown inline).
    pub error: Color,

    /// Control button background.
    pub button_bg: Color,
    /// Control button background under the pointer.
    pub button_bg_hover: Color,
    /// Control button background when engaged (playing, selected speed).
    pub button_bg_active: Color,
    /// Control button border.
    pub button_border: Color,
    /// Control button border when it holds keyboard focus.
    pub button_border_focus: Color,

    /// Scrollbar track background.
    pub scrollbar_track: Color,
    /// Scrollbar thumb color.
    pub scrollbar_thumb: Color,
    /// Scrollbar thumb while dragged or hovered.
    pub scrollbar_thumb_hover: Color,

    /// Small font size.
    pub font_size_sm: u16,
    /// Medium/default font size.
    pub font_size_md: u16,
    /// Large font size (headings).
    pub font_size_lg: u16,

    /// Small spacing.
    pub spacing_sm: u16,
    /// Medium spacing.
    pub spacing_md: u16,
    /// Large spacing.
    pub spacing_lg: u16,

    /// Border radius for buttons.
    pub border_radius_sm: u16,
}

impl Theme {
    /// Dark phosphor theme matching the DATADECK terminal aesthetic.
    pub fn dark() -> Self {
        Self {
            background: Color::rgb(6, 10, 6),
            viewer_bg: Color::rgb(10, 16, 10),

            text_primary: Color::rgb(140, 255, 150),
            text_secondary: Color::rgb(90, 170, 100),
            text_disabled: Color::rgb(50, 90, 55),

            accent: Color::rgb(255, 200, 80),
            error: Color::rgb(240, 90, 80),

            button_bg: Color::rgb(16, 28, 18),
            button_bg_hover: Color::rgb(26, 44, 28),
            button_bg_active: Color::rgb(36, 64, 40),
            button_border: Color::rgb(60, 110, 70),
            button_border_focus: Color::rgb(140, 255, 150),

            scrollbar_track: Color::rgba(140, 255, 150, 16),
            scrollbar_thumb: Color::rgba(140, 255, 150, 60),
            scrollbar_thumb_hover: Color::rgba(140, 255, 150, 110),

            font_size_sm: 8,
            font_size_md: 8,
            font_size_lg: 16,

            spacing_sm: 4,
            spacing_md: 8,
            spacing_lg: 12,

            border_radius_sm: 2,
        }
    }

    /// Text color for a list slot at the given distance from the selection.
    ///
    /// Distance 0 is the selected slot at full brightness; 1 through 4 fade
    /// progressively. Distances past 4 clamp to the faintest tier, which is
    /// also what empty ghost slots at the window edges use.
    pub fn slot_text(&self, distance: u8) -> Color {
        match distance {
            0 => self.text_primary,
            1 => Color::rgb(110, 205, 120),
            2 => Color::rgb(85, 160, 95),
            3 => Color::rgb(62, 118, 70),
            _ => Color::rgb(42, 80, 48),
        }
    }
}
