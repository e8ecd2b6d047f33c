//! Property-based invariant tests for viewport classification and hit testing.
//!
//! 1. Classification is monotone in width.
//! 2. Exactly the widths above the threshold are wide.
//! 3. A point is inside a rect iff it is inside one of its rows.

use folio_core::geometry::Rect;
use folio_core::viewport::{Breakpoint, ViewportClass};
use proptest::prelude::*;

proptest! {
    #[test]
    fn classification_is_monotone(threshold in any::<u32>(), a in any::<u32>(), b in any::<u32>()) {
        let bp = Breakpoint::new(threshold);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if bp.classify(lo) == ViewportClass::Wide {
            prop_assert_eq!(bp.classify(hi), ViewportClass::Wide);
        }
    }

    #[test]
    fn wide_iff_above_threshold(threshold in any::<u32>(), width in any::<u32>()) {
        let bp = Breakpoint::new(threshold);
        prop_assert_eq!(bp.classify(width) == ViewportClass::Wide, width > threshold);
    }

    #[test]
    fn rect_contains_iff_some_row_contains(
        x in 0u16..200, y in 0u16..200, w in 0u16..50, h in 0u16..20,
        px in 0u16..260, py in 0u16..230,
    ) {
        let rect = Rect::new(x, y, w, h);
        let in_some_row = (0..h).filter_map(|i| rect.row(i)).any(|r| r.contains(px, py));
        prop_assert_eq!(rect.contains(px, py), in_some_row);
    }
}
