//! Menu list state and the slot layout algorithms.
//!
//! The scroll variant always renders exactly nine slots with the selection
//! pinned to slot 4; slots whose item index falls outside the list render
//! as empty ghosts but still carry a distance tier so the geometry at list
//! boundaries matches the interior. The locked variant renders every item
//! once with the same distance tiers and no windowing.

use deck_types::error::Result;
use deck_ui::DrawContext;

use crate::descriptor::{MenuItem, Variant};

/// Slots rendered by the scroll variant.
pub const SLOT_COUNT: usize = 9;
/// Slot index the selection is pinned to.
pub const CENTER_SLOT: usize = 4;
/// Distance tiers past this render without a dim class.
pub const MAX_DIM: u8 = 4;

/// Visual emphasis of one rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// The selected item.
    Highlight,
    /// Faded by distance 1-4 from the selection.
    Dim(u8),
    /// Beyond distance 4; no distance class.
    Plain,
}

impl Emphasis {
    fn for_distance(d: u8) -> Self {
        match d {
            0 => Emphasis::Highlight,
            1..=MAX_DIM => Emphasis::Dim(d),
            _ => Emphasis::Plain,
        }
    }

    /// Distance tier used for text fading (ghost slots reuse their tier).
    pub fn tier(self) -> u8 {
        match self {
            Emphasis::Highlight => 0,
            Emphasis::Dim(d) => d,
            Emphasis::Plain => MAX_DIM + 1,
        }
    }
}

/// One rendered row: an item index when populated, `None` for a ghost slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub item: Option<usize>,
    pub emphasis: Emphasis,
}

/// Whether a movement changed the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Selection changed; re-render and play the move cue.
    Moved,
    /// Already at a boundary; nothing happens.
    Boundary,
}

/// Current item list and selection.
#[derive(Debug, Clone)]
pub struct MenuState {
    items: Vec<MenuItem>,
    selected: usize,
    variant: Variant,
}

impl MenuState {
    pub fn new(items: Vec<MenuItem>, variant: Variant) -> Self {
        Self {
            items,
            selected: 0,
            variant,
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.items.get(self.selected)
    }

    /// Replace the item list (autoload refresh), clamping the selection.
    pub fn replace_items(&mut self, items: Vec<MenuItem>) {
        self.items = items;
        if !self.items.is_empty() {
            self.selected = self.selected.min(self.items.len() - 1);
        } else {
            self.selected = 0;
        }
    }

    /// Move the selection down one, clamped at the end.
    pub fn move_down(&mut self) -> MoveOutcome {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
            MoveOutcome::Moved
        } else {
            MoveOutcome::Boundary
        }
    }

    /// Move the selection up one, clamped at the start.
    pub fn move_up(&mut self) -> MoveOutcome {
        if self.selected > 0 {
            self.selected -= 1;
            MoveOutcome::Moved
        } else {
            MoveOutcome::Boundary
        }
    }

    /// The nine scroll-variant slots. Slot `s` maps to item index
    /// `selected + (s - 4)`; out-of-range indices are ghosts.
    pub fn slots(&self) -> [Slot; SLOT_COUNT] {
        std::array::from_fn(|s| {
            let idx = self.selected as i64 + (s as i64 - CENTER_SLOT as i64);
            let dist = (s as i64 - CENTER_SLOT as i64).unsigned_abs() as u8;
            let item = (idx >= 0 && (idx as usize) < self.items.len()).then_some(idx as usize);
            Slot {
                item,
                emphasis: Emphasis::for_distance(dist),
            }
        })
    }

    /// Locked-variant rows: every item once, tagged by distance.
    pub fn rows(&self) -> Vec<Slot> {
        (0..self.items.len())
            .map(|idx| {
                let dist = idx.abs_diff(self.selected).min(u8::MAX as usize) as u8;
                Slot {
                    item: Some(idx),
                    emphasis: Emphasis::for_distance(dist),
                }
            })
            .collect()
    }

    /// Draw the menu list into a rectangle. Rows are a fixed height; the
    /// scroll variant keeps the selected row vertically centered.
    pub fn draw(&self, ctx: &mut DrawContext<'_>, x: i32, y: i32, w: u32, h: u32) -> Result<()> {
        const ROW_H: u32 = 24;
        let rows = match self.variant {
            Variant::Scroll => self.slots().to_vec(),
            Variant::Locked => self.rows(),
        };
        let total_h = rows.len() as u32 * ROW_H;
        let top = y + deck_ui::layout::center(h, total_h);
        let fs = ctx.theme.font_size_md;
        for (i, slot) in rows.iter().enumerate() {
            let Some(idx) = slot.item else {
                continue;
            };
            let label = self.items[idx].label.as_str();
            let color = ctx.theme.slot_text(slot.emphasis.tier());
            let ry = top + (i as u32 * ROW_H) as i32 + (ROW_H as i32 - fs as i32) / 2;
            ctx.backend
                .draw_text_ellipsis(label, x, ry, fs, color, w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn labels(n: usize) -> Vec<MenuItem> {
        (0..n).map(|i| MenuItem::leaf(format!("item{i}"))).collect()
    }

    fn menu(n: usize, selected: usize) -> MenuState {
        let mut m = MenuState::new(labels(n), Variant::Scroll);
        for _ in 0..selected {
            m.move_down();
        }
        m
    }

    #[test]
    fn center_slot_is_selection() {
        let m = menu(20, 7);
        let slots = m.slots();
        assert_eq!(slots[CENTER_SLOT].item, Some(7));
        assert_eq!(slots[CENTER_SLOT].emphasis, Emphasis::Highlight);
    }

    #[test]
    fn slot_indices_follow_formula() {
        let m = menu(20, 7);
        let slots = m.slots();
        for (s, slot) in slots.iter().enumerate() {
            let expect = 7 + s as i64 - 4;
            assert_eq!(slot.item, Some(expect as usize));
        }
    }

    #[test]
    fn boundary_slots_are_ghosts() {
        let m = menu(20, 0);
        let slots = m.slots();
        for slot in &slots[..4] {
            assert_eq!(slot.item, None);
        }
        assert_eq!(slots[4].item, Some(0));
        // Ghosts still carry a dim tier for sizing.
        assert_eq!(slots[0].emphasis, Emphasis::Dim(4));
        assert_eq!(slots[3].emphasis, Emphasis::Dim(1));
    }

    #[test]
    fn short_list_still_windows() {
        // A list shorter than nine slots keeps the same formula; slots
        // outside [0, n) are just empty.
        let m = menu(3, 1);
        let slots = m.slots();
        assert_eq!(slots[3].item, Some(0));
        assert_eq!(slots[4].item, Some(1));
        assert_eq!(slots[5].item, Some(2));
        assert!(slots[..3].iter().all(|s| s.item.is_none()));
        assert!(slots[6..].iter().all(|s| s.item.is_none()));
    }

    #[test]
    fn emphasis_tiers_monotonic() {
        let m = menu(20, 10);
        let slots = m.slots();
        assert_eq!(slots[4].emphasis, Emphasis::Highlight);
        assert_eq!(slots[5].emphasis, Emphasis::Dim(1));
        assert_eq!(slots[6].emphasis, Emphasis::Dim(2));
        assert_eq!(slots[7].emphasis, Emphasis::Dim(3));
        assert_eq!(slots[8].emphasis, Emphasis::Dim(4));
        assert_eq!(slots[3].emphasis, Emphasis::Dim(1));
        assert_eq!(slots[0].emphasis, Emphasis::Dim(4));
    }

    #[test]
    fn movement_clamps_at_boundaries() {
        let mut m = menu(3, 0);
        assert_eq!(m.move_up(), MoveOutcome::Boundary);
        assert_eq!(m.selected(), 0);
        assert_eq!(m.move_down(), MoveOutcome::Moved);
        assert_eq!(m.move_down(), MoveOutcome::Moved);
        assert_eq!(m.move_down(), MoveOutcome::Boundary);
        assert_eq!(m.selected(), 2);
    }

    #[test]
    fn single_item_never_moves() {
        let mut m = menu(1, 0);
        assert_eq!(m.move_down(), MoveOutcome::Boundary);
        assert_eq!(m.move_up(), MoveOutcome::Boundary);
        assert_eq!(m.selected(), 0);
    }

    #[test]
    fn replace_items_clamps_selection() {
        let mut m = menu(10, 9);
        m.replace_items(labels(3));
        assert_eq!(m.selected(), 2);
        m.replace_items(labels(5));
        assert_eq!(m.selected(), 2);
    }

    #[test]
    fn locked_rows_tag_distance() {
        let m = MenuState::new(labels(8), Variant::Locked);
        let rows = m.rows();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].emphasis, Emphasis::Highlight);
        assert_eq!(rows[1].emphasis, Emphasis::Dim(1));
        assert_eq!(rows[4].emphasis, Emphasis::Dim(4));
        assert_eq!(rows[5].emphasis, Emphasis::Plain);
    }

    #[test]
    fn draw_renders_selected_brightest() {
        use deck_ui::test_utils::MockBackend;
        use deck_ui::Theme;
        let theme = Theme::dark();
        let mut backend = MockBackend::new();
        let m = menu(20, 10);
        {
            let mut ctx = DrawContext::new(&mut backend, &theme);
            m.draw(&mut ctx, 0, 0, 300, 240).unwrap();
        }
        assert!(backend.has_text("item10"));
        assert_eq!(backend.text_color("item10"), Some(theme.text_primary));
        assert_ne!(backend.text_color("item11"), Some(theme.text_primary));
        // Nine slots, all populated mid-list.
        assert_eq!(backend.draw_text_count(), 9);
    }

    proptest! {
        #[test]
        fn window_invariants(n in 1usize..40, sel in 0usize..40) {
            prop_assume!(sel < n);
            let m = menu(n, sel);
            let slots = m.slots();
            prop_assert_eq!(slots.len(), SLOT_COUNT);
            prop_assert_eq!(slots[CENTER_SLOT].item, Some(sel));
            for (s, slot) in slots.iter().enumerate() {
                let idx = sel as i64 + s as i64 - CENTER_SLOT as i64;
                if idx >= 0 && (idx as usize) < n {
                    prop_assert_eq!(slot.item, Some(idx as usize));
                } else {
                    prop_assert_eq!(slot.item, None);
                }
            }
        }

        #[test]
        fn movement_stays_in_range(n in 1usize..40, moves in prop::collection::vec(prop::bool::ANY, 0..100)) {
            let mut m = MenuState::new(labels(n), Variant::Scroll);
            for down in moves {
                if down {
                    m.move_down();
                } else {
                    m.move_up();
                }
                prop_assert!(m.selected() < n);
            }
        }
    }
}
