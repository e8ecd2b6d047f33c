#![forbid(unsafe_code)]

//! Viewport classification for feature gating.
//!
//! Hosts report their width in logical pixels through the [`Viewport`]
//! capability. A [`Breakpoint`] splits widths into two classes:
//!
//! | Class    | Width                    | Keyboard shortcuts |
//! |----------|--------------------------|--------------------|
//! | `Narrow` | `<= max_narrow` (768)    | disabled           |
//! | `Wide`   | `> max_narrow`           | enabled            |
//!
//! The width is read once per decision; nothing here watches for changes.

use std::fmt;

/// Width class of the host viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    /// At or below the breakpoint (touch-first layouts).
    Narrow,
    /// Above the breakpoint.
    Wide,
}

impl ViewportClass {
    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ViewportClass::Narrow => "narrow",
            ViewportClass::Wide => "wide",
        }
    }

    /// Whether global keyboard shortcuts are allowed in this class.
    #[must_use]
    pub const fn allows_shortcuts(self) -> bool {
        matches!(self, ViewportClass::Wide)
    }
}

impl fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Threshold separating narrow from wide viewports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoint {
    /// Largest width (logical pixels) still classified as narrow.
    pub max_narrow: u32,
}

impl Breakpoint {
    /// The site's mobile breakpoint: `max-width: 768px`.
    pub const DEFAULT: Self = Self { max_narrow: 768 };

    /// Create a breakpoint with an explicit threshold.
    pub const fn new(max_narrow: u32) -> Self {
        Self { max_narrow }
    }

    /// Classify a width.
    #[inline]
    pub const fn classify(self, width: u32) -> ViewportClass {
        if width <= self.max_narrow {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }

    /// Classify whatever the viewport currently reports.
    pub fn classify_viewport(self, viewport: &dyn Viewport) -> ViewportClass {
        self.classify(viewport.width())
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Capability to read the host viewport width.
pub trait Viewport {
    /// Current width in logical pixels.
    fn width(&self) -> u32;
}

/// A viewport of constant width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedViewport(pub u32);

impl Viewport for FixedViewport {
    fn width(&self) -> u32 {
        self.0
    }
}

/// A terminal viewport: columns times an assumed cell width in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellViewport {
    /// Width in columns.
    pub columns: u16,
    /// Logical pixels per column.
    pub cell_width: u16,
}

impl Viewport for CellViewport {
    fn width(&self) -> u32 {
        u32::from(self.columns) * u32::from(self.cell_width)
    }
}
