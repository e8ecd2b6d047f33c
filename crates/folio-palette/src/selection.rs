#![forbid(unsafe_code)]

//! Highlighted-row state machine.
//!
//! # Invariants
//!
//! 1. `len > 0` implies `index == Some(i)` with `i < len`.
//! 2. `len == 0` implies `index == None`.
//!
//! Every transition preserves both. Navigation wraps around at either end.

/// Which filtered row is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    index: Option<usize>,
    len: usize,
}

impl Selection {
    /// Initial state for a list of `len` rows: row 0, or empty.
    pub const fn new(len: usize) -> Self {
        Self {
            index: if len == 0 { None } else { Some(0) },
            len,
        }
    }

    /// Highlighted row, or `None` when the list is empty.
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    /// Length of the list the selection ranges over.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the list is empty.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move down one row, wrapping to the top.
    pub fn next(&mut self) {
        if let Some(i) = self.index {
            self.index = Some((i + 1) % self.len);
        }
    }

    /// Move up one row, wrapping to the bottom.
    pub fn prev(&mut self) {
        if let Some(i) = self.index {
            self.index = Some((i + self.len - 1) % self.len);
        }
    }

    /// Highlight a specific row. Out-of-range rows are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = Some(index);
        }
    }

    /// Adopt a recomputed list length, clamping a now out-of-range index to 0.
    pub fn reset_on_query_change(&mut self, len: usize) {
        self.len = len;
        self.index = match self.index {
            _ if len == 0 => None,
            Some(i) if i < len => Some(i),
            _ => Some(0),
        };
    }

    /// Start over at row 0 for a freshly opened list.
    pub fn reset_on_open(&mut self, len: usize) {
        *self = Self::new(len);
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_nexts_wrap_on_two_rows() {
        let mut sel = Selection::new(2);
        sel.next();
        assert_eq!(sel.index(), Some(1));
        sel.next();
        assert_eq!(sel.index(), Some(0));
    }

    #[test]
    fn prev_from_top_wraps_to_bottom() {
        let mut sel = Selection::new(3);
        sel.prev();
        assert_eq!(sel.index(), Some(2));
        sel.prev();
        assert_eq!(sel.index(), Some(1));
    }

    #[test]
    fn single_row_stays_put() {
        let mut sel = Selection::new(1);
        sel.next();
        assert_eq!(sel.index(), Some(0));
        sel.prev();
        assert_eq!(sel.index(), Some(0));
    }

    #[test]
    fn empty_is_inert() {
        let mut sel = Selection::new(0);
        sel.next();
        sel.prev();
        sel.select(0);
        assert_eq!(sel.index(), None);
        assert!(sel.is_empty());
    }

    #[test]
    fn query_change_clamps_out_of_range() {
        let mut sel = Selection::new(3);
        sel.select(2);
        sel.reset_on_query_change(2);
        assert_eq!(sel.index(), Some(0));
    }

    #[test]
    fn query_change_keeps_in_range() {
        let mut sel = Selection::new(3);
        sel.select(1);
        sel.reset_on_query_change(2);
        assert_eq!(sel.index(), Some(1));
    }

    #[test]
    fn query_change_to_and_from_empty() {
        let mut sel = Selection::new(2);
        sel.reset_on_query_change(0);
        assert_eq!(sel.index(), None);
        sel.reset_on_query_change(4);
        assert_eq!(sel.index(), Some(0));
    }

    #[test]
    fn reset_on_open_returns_to_top() {
        let mut sel = Selection::new(5);
        sel.select(4);
        sel.reset_on_open(5);
        assert_eq!(sel.index(), Some(0));
    }

    #[test]
    fn select_out_of_range_ignored() {
        let mut sel = Selection::new(2);
        sel.select(1);
        sel.select(7);
        assert_eq!(sel.index(), Some(1));
    }
}
