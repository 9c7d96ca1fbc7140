//! The widget trait all drawable components implement.

use deck_types::error::Result;

use crate::context::DrawContext;

/// A drawable UI component.
///
/// Widgets are plain value types; callers mutate their fields between frames
/// and redraw. No retained scene graph.
pub trait Widget {
    /// Compute the preferred size within the available space.
    fn measure(&self, ctx: &DrawContext<'_>, available_w: u32, available_h: u32) -> (u32, u32);

    /// Draw the widget into the given rectangle.
    fn draw(&self, ctx: &mut DrawContext<'_>, x: i32, y: i32, w: u32, h: u32) -> Result<()>;
}
