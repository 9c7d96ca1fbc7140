//! 2D keyboard focus over the control button grid.
//!
//! Buttons are laid out in rows of six. Horizontal movement cycles through
//! the whole grid with wrap-around. Vertical movement is column-aware:
//! moving down from row one lands on the same column in row two, clamped to
//! the last button when row two is shorter. Moving down from row two, and
//! up from row two, both land on the column above. Moving up from row one
//! falls through to the row-two slot when one exists and otherwise stays
//! put -- deliberately kept as-is rather than remodeled as a strict grid.

/// Buttons per row.
pub const GRID_COLUMNS: usize = 6;

/// Keyboard focus index over a button grid. `None` means no keyboard focus
/// (pointer interaction takes precedence and clears it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusGrid {
    focus: Option<usize>,
    total: usize,
}

impl FocusGrid {
    /// A grid of `total` buttons with no initial focus.
    pub fn new(total: usize) -> Self {
        Self { focus: None, total }
    }

    /// Currently focused button, if any.
    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    /// Drop keyboard focus (pointer took over).
    pub fn clear(&mut self) {
        self.focus = None;
    }

    /// Total number of buttons.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Cycle focus right, wrapping past the last button. From no focus,
    /// lands on the first button.
    pub fn right(&mut self) {
        if self.total == 0 {
            return;
        }
        let cur = self.focus.map(|f| f as i64).unwrap_or(-1);
        self.focus = Some(((cur + 1).rem_euclid(self.total as i64)) as usize);
    }

    /// Cycle focus left, wrapping past the first button. From no focus,
    /// lands just left of the first button (i.e. the second-to-last slot of
    /// the cycle starting at -1).
    pub fn left(&mut self) {
        if self.total == 0 {
            return;
        }
        let cur = self.focus.map(|f| f as i64).unwrap_or(-1);
        self.focus = Some(((cur - 1).rem_euclid(self.total as i64)) as usize);
    }

    /// Column-aware downward movement.
    pub fn down(&mut self) {
        if self.total == 0 {
            return;
        }
        let cur = self.focus.unwrap_or(0);
        let next = if cur < GRID_COLUMNS {
            let candidate = GRID_COLUMNS + (cur % GRID_COLUMNS);
            if candidate < self.total {
                candidate
            } else {
                self.total - 1
            }
        } else {
            cur - GRID_COLUMNS
        };
        self.focus = Some(next);
    }

    /// Column-aware upward movement.
    pub fn up(&mut self) {
        if self.total == 0 {
            return;
        }
        let cur = self.focus.unwrap_or(0);
        let next = if cur >= GRID_COLUMNS {
            cur - GRID_COLUMNS
        } else {
            let candidate = GRID_COLUMNS + (cur % GRID_COLUMNS);
            if candidate < self.total {
                candidate
            } else {
                cur
            }
        };
        self.focus = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_unfocused() {
        let g = FocusGrid::new(12);
        assert_eq!(g.focused(), None);
    }

    #[test]
    fn right_from_unfocused_lands_on_first() {
        let mut g = FocusGrid::new(12);
        g.right();
        assert_eq!(g.focused(), Some(0));
    }

    #[test]
    fn left_from_unfocused_wraps() {
        let mut g = FocusGrid::new(12);
        g.left();
        assert_eq!(g.focused(), Some(10));
    }

    #[test]
    fn right_wraps_at_end() {
        let mut g = FocusGrid::new(12);
        for _ in 0..12 {
            g.right();
        }
        assert_eq!(g.focused(), Some(11));
        g.right();
        assert_eq!(g.focused(), Some(0));
    }

    #[test]
    fn left_wraps_at_start() {
        let mut g = FocusGrid::new(12);
        g.right(); // 0
        g.left();
        assert_eq!(g.focused(), Some(11));
    }

    #[test]
    fn down_from_row_one_keeps_column() {
        let mut g = FocusGrid::new(12);
        g.right(); // 0
        g.right(); // 1
        g.right(); // 2
        g.down();
        assert_eq!(g.focused(), Some(8));
    }

    #[test]
    fn down_from_row_two_moves_up() {
        // Matches the source behavior: down from the bottom row lands on
        // the column above rather than staying put.
        let mut g = FocusGrid::new(12);
        g.right(); // 0
        g.down(); // 6
        g.down();
        assert_eq!(g.focused(), Some(0));
    }

    #[test]
    fn down_clamps_when_row_two_shorter() {
        // 8 buttons: row two holds indices 6 and 7 only.
        let mut g = FocusGrid::new(8);
        for _ in 0..6 {
            g.right();
        }
        assert_eq!(g.focused(), Some(5));
        g.down();
        assert_eq!(g.focused(), Some(7));
    }

    #[test]
    fn up_from_row_two_keeps_column() {
        let mut g = FocusGrid::new(12);
        g.right(); // 0
        g.down(); // 6
        g.right(); // 7
        g.up();
        assert_eq!(g.focused(), Some(1));
    }

    #[test]
    fn up_from_row_one_falls_through_to_row_two() {
        let mut g = FocusGrid::new(12);
        g.right(); // 0
        g.up();
        assert_eq!(g.focused(), Some(6));
    }

    #[test]
    fn up_from_row_one_stays_when_no_slot_below() {
        // 6 buttons: single row, up goes nowhere.
        let mut g = FocusGrid::new(6);
        g.right();
        g.right(); // 1
        g.up();
        assert_eq!(g.focused(), Some(1));
    }

    #[test]
    fn down_from_unfocused_starts_at_zero() {
        let mut g = FocusGrid::new(12);
        g.down();
        assert_eq!(g.focused(), Some(6));
    }

    #[test]
    fn clear_drops_focus() {
        let mut g = FocusGrid::new(12);
        g.right();
        g.clear();
        assert_eq!(g.focused(), None);
    }

    #[test]
    fn empty_grid_is_inert() {
        let mut g = FocusGrid::new(0);
        g.right();
        g.left();
        g.up();
        g.down();
        assert_eq!(g.focused(), None);
    }

    proptest! {
        #[test]
        fn focus_always_in_range(total in 1usize..=12, moves in prop::collection::vec(0u8..4, 0..64)) {
            let mut g = FocusGrid::new(total);
            for m in moves {
                match m {
                    0 => g.right(),
                    1 => g.left(),
                    2 => g.up(),
                    _ => g.down(),
                }
                if let Some(f) = g.focused() {
                    prop_assert!(f < total);
                }
            }
        }

        #[test]
        fn horizontal_cycle_returns_home(total in 1usize..=12, start in 0usize..12) {
            prop_assume!(start < total);
            let mut g = FocusGrid::new(total);
            // Walk to the start position.
            for _ in 0..=start {
                g.right();
            }
            prop_assert_eq!(g.focused(), Some(start));
            for _ in 0..total {
                g.right();
            }
            prop_assert_eq!(g.focused(), Some(start));
        }
    }
}
