#![forbid(unsafe_code)]

//! Overlay geometry and pointer hit testing.
//!
//! The surface is centered horizontally, about 3/5 of the host width, and
//! sits near the top of the host area:
//!
//! ```text
//! ┌──────────────────────────────────────┐  border
//! │ ⌕ query…                      esc ×  │  query line + close button
//! ├──────────────────────────────────────┤  separator
//! │ > Projects  View my projects   Pages │  body rows
//! │   Art Gallery  Animated co…    Pages │
//! ├──────────────────────────────────────┤  separator
//! │ ↑ ↓ navigate  ↵ select  esc close    │  footer
//! └──────────────────────────────────────┘  border
//! ```

use folio_core::geometry::Rect;

/// Rows of chrome around the body: border, query, separator (top) and
/// separator, footer, border (bottom).
pub const CHROME_ROWS: u16 = 6;

/// Narrowest surface worth drawing.
pub const MIN_SURFACE_WIDTH: u16 = 30;

/// Where a pointer press landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A visible body row, counted from the top of the body.
    Row(usize),
    /// The header close button.
    CloseButton,
    /// Inside the surface but not on anything interactive.
    Surface,
    /// Outside the surface.
    Backdrop,
}

/// Computed placement of the palette within a host area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteLayout {
    /// The whole overlay surface including borders.
    pub surface: Rect,
    /// The query input line.
    pub query: Rect,
    /// The close button cell.
    pub close_button: Rect,
    /// Body rows (results or empty state).
    pub body: Rect,
    /// Footer hint line.
    pub footer: Rect,
}

impl PaletteLayout {
    /// Place a surface with `body_rows` body rows inside `area`.
    ///
    /// The body is shortened when the area is too short to fit it.
    pub fn compute(area: Rect, body_rows: u16) -> Self {
        let width = (area.width.saturating_mul(3) / 5)
            .max(MIN_SURFACE_WIDTH)
            .min(area.width.saturating_sub(2));
        let height = body_rows
            .saturating_add(CHROME_ROWS)
            .min(area.height.saturating_sub(1));
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + (area.height / 12).min(area.height.saturating_sub(height));
        let surface = Rect::new(x, y, width, height);

        let inner_width = width.saturating_sub(2);
        let query = Rect::new(x + 1, y + 1, inner_width, height.min(1));
        let close_button = Rect::new(surface.right().saturating_sub(3), y + 1, 1, height.min(1));
        let body = Rect::new(
            x + 1,
            y + 3,
            inner_width,
            height.saturating_sub(CHROME_ROWS),
        );
        let footer = Rect::new(x + 1, surface.bottom().saturating_sub(2), inner_width, 1);

        Self {
            surface,
            query,
            close_button,
            body,
            footer,
        }
    }

    /// Most body rows a surface can get inside `area`.
    pub fn body_capacity(area: Rect) -> u16 {
        area.height.saturating_sub(1).saturating_sub(CHROME_ROWS)
    }

    /// Classify a pointer press at `(x, y)`.
    pub fn hit_test(&self, x: u16, y: u16) -> PointerTarget {
        if !self.surface.contains(x, y) {
            PointerTarget::Backdrop
        } else if self.close_button.contains(x, y) {
            PointerTarget::CloseButton
        } else if self.body.contains(x, y) {
            PointerTarget::Row(usize::from(y - self.body.y))
        } else {
            PointerTarget::Surface
        }
    }
}
