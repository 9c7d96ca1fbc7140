//! Synthetic scrollbar for the file viewer.
//!
//! The thumb is purely presentational: it is recomputed from the content
//! scroll position and pane metrics on every relevant event, never stored
//! as authoritative state.

use deck_types::error::Result;

use crate::context::DrawContext;
use crate::widget::Widget;

/// Smallest thumb the track will show, in pixels.
pub const MIN_THUMB_HEIGHT: u32 = 20;
/// Breathing room left at the track bottom when content fits entirely.
pub const TRACK_GAP: u32 = 2;

/// Thumb geometry within the track, in track-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbMetrics {
    /// Thumb height.
    pub height: u32,
    /// Thumb offset from the track top.
    pub top: u32,
}

impl ThumbMetrics {
    /// Compute thumb geometry.
    ///
    /// Height is proportional to the visible/total ratio with a minimum
    /// enforced; position is proportional to the scroll offset. When the
    /// content fits, the thumb fills the track (minus a small gap) and sits
    /// at the top.
    pub fn compute(track_h: u32, viewport_h: u32, content_h: u32, scroll_top: u32) -> Self {
        if content_h <= viewport_h || viewport_h == 0 {
            return Self {
                height: track_h.saturating_sub(TRACK_GAP),
                top: 0,
            };
        }
        let proportional = (track_h as u64 * viewport_h as u64 / content_h as u64) as u32;
        let height = proportional.max(MIN_THUMB_HEIGHT).min(track_h);
        let max_top = track_h - height;
        let max_scroll = content_h - viewport_h;
        let top = (max_top as u64 * scroll_top.min(max_scroll) as u64 / max_scroll as u64) as u32;
        Self { height, top }
    }

    /// Map a drag position (pointer Y relative to the track top) back to a
    /// content scroll offset. Inverse of [`compute`](Self::compute): the
    /// ratio of thumb travel to maximum travel gives the scroll fraction.
    pub fn scroll_for_drag(
        &self,
        y_rel: i32,
        track_h: u32,
        viewport_h: u32,
        content_h: u32,
    ) -> u32 {
        if content_h <= viewport_h {
            return 0;
        }
        let max_top = track_h.saturating_sub(self.height);
        if max_top == 0 {
            return 0;
        }
        let y = y_rel.clamp(0, max_top as i32) as u32;
        let max_scroll = content_h - viewport_h;
        (y as u64 * max_scroll as u64 / max_top as u64) as u32
    }
}

/// Scrollbar widget: a vertical track with the computed thumb.
pub struct ScrollBar {
    /// Total content height in pixels.
    pub content_h: u32,
    /// Visible pane height in pixels.
    pub viewport_h: u32,
    /// Current scroll offset in pixels.
    pub scroll_top: u32,
    /// Pointer is over or dragging the thumb.
    pub engaged: bool,
}

impl ScrollBar {
    pub fn new(content_h: u32, viewport_h: u32) -> Self {
        Self {
            content_h,
            viewport_h,
            scroll_top: 0,
            engaged: false,
        }
    }
}

impl Widget for ScrollBar {
    fn measure(&self, _ctx: &DrawContext<'_>, _available_w: u32, available_h: u32) -> (u32, u32) {
        (6, available_h)
    }

    fn draw(&self, ctx: &mut DrawContext<'_>, x: i32, y: i32, w: u32, h: u32) -> Result<()> {
        ctx.backend.fill_rect(x, y, w, h, ctx.theme.scrollbar_track)?;
        let m = ThumbMetrics::compute(h, self.viewport_h, self.content_h, self.scroll_top);
        let color = if self.engaged {
            ctx.theme.scrollbar_thumb_hover
        } else {
            ctx.theme.scrollbar_thumb
        };
        ctx.backend
            .fill_rect(x, y + m.top as i32, w, m.height, color)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockBackend;
    use crate::theme::Theme;

    #[test]
    fn unscrollable_fills_track_minus_gap() {
        let m = ThumbMetrics::compute(200, 300, 100, 0);
        assert_eq!(m.height, 198);
        assert_eq!(m.top, 0);
    }

    #[test]
    fn proportional_height() {
        // Half the content visible: thumb is half the track.
        let m = ThumbMetrics::compute(200, 100, 200, 0);
        assert_eq!(m.height, 100);
    }

    #[test]
    fn minimum_height_enforced() {
        // 1% visible would give a 2px thumb; clamps to 20.
        let m = ThumbMetrics::compute(200, 10, 1000, 0);
        assert_eq!(m.height, MIN_THUMB_HEIGHT);
    }

    #[test]
    fn top_proportional_to_scroll() {
        let m0 = ThumbMetrics::compute(200, 100, 200, 0);
        assert_eq!(m0.top, 0);
        let m_half = ThumbMetrics::compute(200, 100, 200, 50);
        assert_eq!(m_half.top, 50);
        let m_end = ThumbMetrics::compute(200, 100, 200, 100);
        assert_eq!(m_end.top, 100);
        assert_eq!(m_end.top + m_end.height, 200);
    }

    #[test]
    fn scroll_top_past_end_clamps() {
        let m = ThumbMetrics::compute(200, 100, 200, 10_000);
        assert_eq!(m.top + m.height, 200);
    }

    #[test]
    fn drag_roundtrip() {
        let m = ThumbMetrics::compute(200, 100, 400, 0);
        // Drag to the bottom of the track: full scroll range.
        let max = m.scroll_for_drag(200, 200, 100, 400);
        assert_eq!(max, 300);
        // Drag to the top: zero.
        assert_eq!(m.scroll_for_drag(0, 200, 100, 400), 0);
        // Negative positions clamp to zero.
        assert_eq!(m.scroll_for_drag(-50, 200, 100, 400), 0);
    }

    #[test]
    fn drag_on_unscrollable_content_is_zero() {
        let m = ThumbMetrics::compute(200, 300, 100, 0);
        assert_eq!(m.scroll_for_drag(120, 200, 300, 100), 0);
    }

    #[test]
    fn drag_midpoint_maps_linearly() {
        let m = ThumbMetrics::compute(220, 100, 300, 0);
        let max_top = 220 - m.height;
        let mid = m.scroll_for_drag(max_top as i32 / 2, 220, 100, 300);
        let full = m.scroll_for_drag(max_top as i32, 220, 100, 300);
        assert_eq!(full, 200);
        assert!(mid.abs_diff(100) <= 1);
    }

    #[test]
    fn draw_emits_track_and_thumb() {
        let theme = Theme::dark();
        let mut backend = MockBackend::new();
        {
            let mut ctx = DrawContext::new(&mut backend, &theme);
            let sb = ScrollBar::new(400, 100);
            sb.draw(&mut ctx, 630, 0, 6, 200).unwrap();
        }
        assert_eq!(backend.fill_rect_count(), 2);
    }
}
