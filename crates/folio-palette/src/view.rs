#![forbid(unsafe_code)]

//! Render-ready snapshot of an open palette, plus a plain-text renderer.
//!
//! [`PaletteView`] is what a host draws: query or placeholder, the visible
//! result rows with the highlighted one marked, the empty state, and the
//! footer hints. [`PaletteView::render_lines`] lays it out as box-drawn text
//! sized to a [`PaletteLayout`], for terminal hosts and snapshot tests.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::entry::Entry;
use crate::layout::PaletteLayout;

/// Title of the empty state.
pub const NO_RESULTS: &str = "No results found";
/// Secondary line of the empty state, shown when a query is present.
pub const TRY_ANOTHER: &str = "Try searching for something else";

/// A key hint shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    /// Key glyphs.
    pub keys: &'static str,
    /// What the keys do.
    pub label: &'static str,
}

/// Footer hints while the keyboard listener is attached.
pub const KEYBOARD_HINTS: &[Hint] = &[
    Hint {
        keys: "↑ ↓",
        label: "navigate",
    },
    Hint {
        keys: "↵",
        label: "select",
    },
    Hint {
        keys: "esc",
        label: "close",
    },
];

/// Signal that nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    /// Whether to suggest a different query (the query is non-empty).
    pub suggest_rephrase: bool,
}

impl EmptyState {
    /// Headline text.
    pub const fn title(&self) -> &'static str {
        NO_RESULTS
    }

    /// Secondary text, if any.
    pub const fn hint(&self) -> Option<&'static str> {
        if self.suggest_rephrase {
            Some(TRY_ANOTHER)
        } else {
            None
        }
    }
}

/// One visible result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowView<'a> {
    /// The entry shown.
    pub entry: &'a Entry,
    /// Whether this row is the keyboard selection.
    pub selected: bool,
    /// Whether the pointer is over this row.
    pub hovered: bool,
}

/// Snapshot of an open palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteView<'a> {
    /// Current query.
    pub query: &'a str,
    /// Placeholder for the empty query.
    pub placeholder: &'a str,
    /// Visible rows, top to bottom.
    pub rows: Vec<RowView<'a>>,
    /// Set when nothing matched.
    pub empty: Option<EmptyState>,
    /// Footer hints (empty when keyboard shortcuts are off).
    pub hints: &'static [Hint],
    /// Filtered position of the first visible row.
    pub scroll_offset: usize,
    /// Total filtered matches.
    pub total: usize,
}

impl PaletteView<'_> {
    /// Body rows this view needs: one per visible row, or two for the empty state.
    pub fn body_height(&self) -> u16 {
        if self.empty.is_some() {
            2
        } else {
            u16::try_from(self.rows.len()).unwrap_or(u16::MAX)
        }
    }

    /// Lay the view out as text lines matching `layout.surface`.
    ///
    /// Every line has the surface's display width; there are at most
    /// `layout.surface.height` lines.
    pub fn render_lines(&self, layout: &PaletteLayout) -> Vec<String> {
        let width = usize::from(layout.surface.width);
        if width < 2 {
            return Vec::new();
        }
        let inner = width - 2;
        let mut lines = Vec::with_capacity(usize::from(layout.surface.height));

        lines.push(rule('┌', '┐', inner));
        lines.push(framed(&self.query_line(inner)));
        lines.push(rule('├', '┤', inner));

        let body_rows = usize::from(layout.body.height);
        match self.empty {
            Some(empty) => {
                let body = [empty.title(), empty.hint().unwrap_or("")];
                for text in body.iter().take(body_rows) {
                    lines.push(framed(&center(text, inner)));
                }
            }
            None => {
                for row in self.rows.iter().take(body_rows) {
                    lines.push(framed(&row_line(row, inner)));
                }
            }
        }

        lines.push(rule('├', '┤', inner));
        lines.push(framed(&fit(&self.footer_text(), inner)));
        lines.push(rule('└', '┘', inner));

        lines.truncate(usize::from(layout.surface.height));
        lines
    }

    fn query_line(&self, inner: usize) -> String {
        const CLOSE: &str = "esc × ";
        let text = if self.query.is_empty() {
            self.placeholder
        } else {
            self.query
        };
        let left_width = inner.saturating_sub(CLOSE.width());
        format!("{}{CLOSE}", fit(&format!(" > {text}"), left_width))
    }

    fn footer_text(&self) -> String {
        let hints: Vec<String> = self
            .hints
            .iter()
            .map(|h| format!("{} {}", h.keys, h.label))
            .collect();
        format!(" {}", hints.join("  "))
    }
}

fn row_line(row: &RowView<'_>, inner: usize) -> String {
    // The keyboard selection wins when both land on one row.
    let marker = match (row.selected, row.hovered) {
        (true, _) => "> ",
        (false, true) => "· ",
        (false, false) => "  ",
    };
    let badge = format!(" {} ", row.entry.category);
    let left_width = inner.saturating_sub(badge.width());
    let left = if row.entry.description.is_empty() {
        format!("{marker}{}", row.entry.title)
    } else {
        format!("{marker}{}  {}", row.entry.title, row.entry.description)
    };
    let mut line = fit(&left, left_width);
    line.push_str(&fit(&badge, inner - left_width));
    line
}

fn rule(left: char, right: char, inner: usize) -> String {
    let mut line = String::with_capacity(inner * 3 + 8);
    line.push(left);
    line.extend(std::iter::repeat_n('─', inner));
    line.push(right);
    line
}

fn framed(content: &str) -> String {
    format!("│{content}│")
}

fn center(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let pad = (width - text.width()) / 2;
    fit(&format!("{}{text}", " ".repeat(pad)), width)
}

/// Truncate to `width` display columns (ellipsis when cut) and pad with spaces.
pub fn fit(text: &str, width: usize) -> String {
    let mut out = truncate(text, width);
    let used = out.width();
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    out
}

/// Truncate to at most `width` display columns on grapheme boundaries,
/// ending in `…` when anything was cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_owned();
    }
    if width == 0 {
        return String::new();
    }
    let budget = width - 1;
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if used + w > budget {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::geometry::Rect;

    fn entry() -> Entry {
        Entry::new("projects", "Projects")
            .with_description("View my projects")
            .with_category("Pages")
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("Art Gallery", 20), "Art Gallery");
        assert_eq!(truncate("Art Gallery", 6), "Art G…");
        assert_eq!(truncate("Art Gallery", 0), "");
    }

    #[test]
    fn truncate_respects_wide_graphemes() {
        // Each CJK glyph is two columns wide.
        assert_eq!(truncate("日本語の", 5), "日本…");
        assert_eq!(fit("日本語の", 5).width(), 5);
    }

    #[test]
    fn empty_state_hint_only_with_query() {
        assert_eq!(EmptyState { suggest_rephrase: false }.hint(), None);
        assert_eq!(
            EmptyState { suggest_rephrase: true }.hint(),
            Some("Try searching for something else")
        );
    }

    #[test]
    fn rendered_lines_match_layout() {
        let e = entry();
        let view = PaletteView {
            query: "",
            placeholder: "Search for pages and sections...",
            rows: vec![RowView {
                entry: &e,
                selected: true,
                hovered: false,
            }],
            empty: None,
            hints: KEYBOARD_HINTS,
            scroll_offset: 0,
            total: 1,
        };
        let layout = PaletteLayout::compute(Rect::from_size(100, 30), view.body_height());
        let lines = view.render_lines(&layout);
        assert_eq!(lines.len(), usize::from(layout.surface.height));
        for line in &lines {
            assert_eq!(line.width(), usize::from(layout.surface.width), "{line:?}");
        }
        assert!(lines[1].contains("Search for pages"));
        assert!(lines[1].contains("esc ×"));
        assert!(lines[3].starts_with("│> Projects  View my projects"));
        assert!(lines[3].trim_end_matches('│').trim_end().ends_with("Pages"));
        assert!(lines[5].contains("↵ select"));
    }

    #[test]
    fn hovered_row_is_marked_apart_from_selection() {
        let e = entry();
        let row = |selected, hovered| RowView {
            entry: &e,
            selected,
            hovered,
        };
        assert!(row_line(&row(false, true), 40).starts_with("· Projects"));
        assert!(row_line(&row(true, true), 40).starts_with("> Projects"));
        assert!(row_line(&row(false, false), 40).starts_with("  Projects"));
    }

    #[test]
    fn close_button_lands_on_layout_cell() {
        let view = PaletteView {
            query: "art",
            placeholder: "",
            rows: Vec::new(),
            empty: Some(EmptyState {
                suggest_rephrase: true,
            }),
            hints: &[],
            scroll_offset: 0,
            total: 0,
        };
        let layout = PaletteLayout::compute(Rect::from_size(80, 24), view.body_height());
        let lines = view.render_lines(&layout);
        let col = usize::from(layout.close_button.x - layout.surface.x);
        assert_eq!(lines[1].chars().nth(col), Some('×'));
        assert!(lines[3].contains(NO_RESULTS));
        assert!(lines[4].contains(TRY_ANOTHER));
    }
}
