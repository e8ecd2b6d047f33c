#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle for layout bounds and hit testing.
///
/// Uses cell coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by `h` cells on the left/right and `v` cells on the top/bottom.
    pub fn inset(&self, h: u16, v: u16) -> Rect {
        Rect {
            x: self.x.saturating_add(h),
            y: self.y.saturating_add(v),
            width: self.width.saturating_sub(h.saturating_mul(2)),
            height: self.height.saturating_sub(v.saturating_mul(2)),
        }
    }

    /// The single row at `offset` from the top, or `None` past the bottom.
    pub fn row(&self, offset: u16) -> Option<Rect> {
        (offset < self.height).then(|| Rect::new(self.x, self.y + offset, self.width, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert!(!r.contains(5, 5));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::new(5, 5, 0, 3);
        assert!(r.is_empty());
        assert!(!r.contains(5, 5));
    }

    #[test]
    fn inset_saturates() {
        let r = Rect::from_size(3, 3).inset(2, 2);
        assert_eq!(r, Rect::new(2, 2, 0, 0));
    }

    #[test]
    fn row_slicing() {
        let r = Rect::new(1, 10, 20, 3);
        assert_eq!(r.row(0), Some(Rect::new(1, 10, 20, 1)));
        assert_eq!(r.row(2), Some(Rect::new(1, 12, 20, 1)));
        assert_eq!(r.row(3), None);
    }
}
