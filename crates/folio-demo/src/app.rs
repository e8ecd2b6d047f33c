#![forbid(unsafe_code)]

//! The demo host: a pretend site page with the palette layered on top.

use folio_core::event::{Event, KeyCode, KeyEvent};
use folio_core::geometry::Rect;
use folio_core::viewport::{CellViewport, FixedViewport};
use folio_palette::{CommandPalette, PaletteConfig, RecordingNavigator, Registry};
use unicode_width::UnicodeWidthStr;

use crate::cli::Opts;

/// A piece of text to draw at a screen position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Text, already fitted to the screen.
    pub text: String,
}

/// One frame: text spans plus where the cursor should sit, if visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Spans in draw order.
    pub spans: Vec<Span>,
    /// Cursor position when the query input has focus.
    pub cursor: Option<(u16, u16)>,
}

/// Demo state.
#[derive(Debug)]
pub struct App {
    palette: CommandPalette<RecordingNavigator>,
    fixed_width: Option<u32>,
    cell_width: u16,
    area: Rect,
    input_focused: bool,
    quit: bool,
}

impl App {
    /// Build the demo for a `width`×`height` terminal.
    pub fn new(opts: &Opts, config: PaletteConfig, width: u16, height: u16) -> Self {
        let area = Rect::from_size(width, height);
        let mut app = Self {
            palette: CommandPalette::new(Registry::portfolio(), RecordingNavigator::new())
                .with_config(config)
                .with_area(area),
            fixed_width: opts.viewport_width,
            cell_width: opts.cell_width,
            area,
            input_focused: false,
            quit: false,
        };
        app.apply_viewport();
        app
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// The palette.
    pub fn palette(&self) -> &CommandPalette<RecordingNavigator> {
        &self.palette
    }

    /// Route on the pretend page.
    pub fn current_route(&self) -> &str {
        self.palette.navigator().last().unwrap_or("/")
    }

    /// Feed one input event.
    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Resize { width, height } = *event {
            self.area = Rect::from_size(width, height);
            self.apply_viewport();
            self.palette.reevaluate_viewport();
        }

        let outcome = self.palette.handle_event(event);
        if !self.palette.is_open() {
            self.input_focused = false;
        }
        if outcome.prevents_default() || self.palette.is_open() {
            return;
        }
        if let Event::Key(key) = event
            && is_quit(key)
        {
            self.quit = true;
        }
    }

    fn apply_viewport(&mut self) {
        match self.fixed_width {
            Some(width) => self.palette.set_viewport(FixedViewport(width)),
            None => self.palette.set_viewport(CellViewport {
                columns: self.area.width,
                cell_width: self.cell_width,
            }),
        }
    }

    /// Lay out the next frame.
    ///
    /// Consumes the palette's focus request, so the cursor appears in the
    /// query input from the first frame after opening.
    pub fn frame(&mut self) -> Frame {
        let mut frame = Frame::default();
        let width = usize::from(self.area.width);
        let mut line = |y: u16, text: String| {
            if y < self.area.height {
                frame.spans.push(Span {
                    x: 0,
                    y,
                    text: folio_palette::view::fit(&text, width),
                });
            }
        };

        line(0, " folio".to_owned());
        line(1, format!(" page: {}", self.current_route()));
        let class = self
            .palette
            .viewport_class()
            .map_or(String::new(), |c| format!("  ({c} viewport)"));
        line(
            self.area.height.saturating_sub(1),
            format!(" Ctrl+K command palette   q quit{class}"),
        );

        let Some(layout) = self.palette.layout() else {
            return frame;
        };
        let Some(view) = self.palette.view() else {
            return frame;
        };
        for (row, text) in (layout.surface.y..).zip(view.render_lines(&layout)) {
            frame.spans.push(Span {
                x: layout.surface.x,
                y: row,
                text,
            });
        }

        if self.palette.take_focus_request() {
            self.input_focused = true;
        }
        if self.input_focused && !layout.query.is_empty() {
            // Past the " > " prompt.
            let typed = u16::try_from(self.palette.query().width()).unwrap_or(u16::MAX);
            let x = layout
                .query
                .x
                .saturating_add(3)
                .saturating_add(typed)
                .min(layout.query.right().saturating_sub(1));
            frame.cursor = Some((x, layout.query.y));
        }
        frame
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.is_actionable()
        && match key.code {
            KeyCode::Char('q') => key.modifiers.is_empty(),
            KeyCode::Char('c') => key.ctrl(),
            _ => false,
        }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::event::{Modifiers, MouseButton, MouseEvent, MouseEventKind};

    fn app(width: u16, height: u16) -> App {
        App::new(&Opts::default(), PaletteConfig::default(), width, height)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL))
    }

    #[test]
    fn quit_only_when_palette_closed() {
        let mut app = app(120, 30);
        app.handle_event(&ctrl('k'));
        app.handle_event(&key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert_eq!(app.palette().query(), "q");

        app.handle_event(&key(KeyCode::Escape));
        app.handle_event(&key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn navigation_updates_page_line() {
        let mut app = app(120, 30);
        app.handle_event(&ctrl('k'));
        for c in "gallery".chars() {
            app.handle_event(&key(KeyCode::Char(c)));
        }
        app.handle_event(&key(KeyCode::Enter));
        assert_eq!(app.current_route(), "/artgallery");
        let frame = app.frame();
        assert!(frame.spans[1].text.starts_with(" page: /artgallery"));
        assert_eq!(frame.cursor, None);
    }

    #[test]
    fn narrow_terminal_disables_palette_keys() {
        // 80 columns at 8px is 640px: narrow.
        let mut app = app(80, 24);
        app.handle_event(&ctrl('k'));
        assert!(app.palette().is_open());
        assert!(!app.palette().keyboard_enabled());

        app.handle_event(&key(KeyCode::Escape));
        assert!(app.palette().is_open());

        let body = app.palette().layout().unwrap().body;
        app.handle_event(&Event::Mouse(MouseEvent::new(
            MouseEventKind::Down(MouseButton::Left),
            body.x,
            body.y,
        )));
        assert_eq!(app.current_route(), "/projects");
    }

    #[test]
    fn resize_reclassifies_open_session() {
        let mut app = app(80, 24);
        app.handle_event(&ctrl('k'));
        assert!(!app.palette().keyboard_enabled());
        app.handle_event(&Event::Resize {
            width: 140,
            height: 40,
        });
        assert!(app.palette().keyboard_enabled());
    }

    #[test]
    fn fixed_width_ignores_terminal_size() {
        let opts = Opts {
            viewport_width: Some(1920),
            ..Opts::default()
        };
        let mut app = App::new(&opts, PaletteConfig::default(), 60, 20);
        app.handle_event(&ctrl('k'));
        assert!(app.palette().keyboard_enabled());
    }

    #[test]
    fn cursor_follows_query() {
        let mut app = app(120, 30);
        app.handle_event(&ctrl('k'));
        let first = app.frame();
        let (x0, y) = first.cursor.expect("cursor after open");
        app.handle_event(&key(KeyCode::Char('a')));
        let second = app.frame();
        assert_eq!(second.cursor, Some((x0 + 1, y)));
        let layout = app.palette().layout().unwrap();
        assert_eq!(y, layout.query.y);
    }

    #[test]
    fn frame_spans_fit_screen() {
        let mut app = app(50, 12);
        app.handle_event(&ctrl('k'));
        let frame = app.frame();
        for span in &frame.spans {
            assert!(span.y < 12);
            assert!(usize::from(span.x) + span.text.width() <= 50, "{span:?}");
        }
    }
}
