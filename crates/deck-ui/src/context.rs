//! Themed drawing context passed to every widget.

use deck_types::backend::SdiBackend;
use deck_types::error::Result;

use crate::theme::Theme;

/// Bundles the rendering backend with the active theme so widgets take a
/// single argument instead of two.
pub struct DrawContext<'a> {
    pub backend: &'a mut dyn SdiBackend,
    pub theme: &'a Theme,
}

impl<'a> DrawContext<'a> {
    pub fn new(backend: &'a mut dyn SdiBackend, theme: &'a Theme) -> Self {
        Self { backend, theme }
    }

    /// Draw a single line of primary-colored text at the default font size.
    pub fn label(&mut self, text: &str, x: i32, y: i32) -> Result<()> {
        let fs = self.theme.font_size_md;
        let color = self.theme.text_primary;
        self.backend.draw_text(text, x, y, fs, color)
    }
}
