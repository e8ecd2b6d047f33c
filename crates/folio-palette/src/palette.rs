#![forbid(unsafe_code)]

//! The command palette: open/close lifecycle around a search session.
//!
//! # Lifecycle
//!
//! ```text
//! closed ──open()──▶ open(session) ──Escape / backdrop / × / activation──▶ closed
//!                      │   ▲
//!                      └───┘ typing, arrows, pointer
//! ```
//!
//! Opening creates a fresh session (empty query, all entries, row 0) and
//! attaches the key listener when the viewport is wide. Every close path
//! drops the session, which drops the listener guard, and then notifies
//! the host's `on_close` callback.
//!
//! # Invariants
//!
//! 1. The listener is attached only while a session exists.
//! 2. The selection is always in range for the current filtered list.
//! 3. Results keep registry order.

use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

use folio_core::event::{Event, KeyCode, KeyEvent, Modifiers, MouseEventKind};
use folio_core::geometry::Rect;
use folio_core::viewport::{FixedViewport, Viewport, ViewportClass};

use crate::activation::{self, CloseReason, Navigator, PaletteAction};
use crate::config::PaletteConfig;
use crate::dispatcher::{KeyCommand, KeyDispatcher, ListenerHost, SessionId};
use crate::entry::Entry;
use crate::filter::{self, FilteredList};
use crate::layout::{PaletteLayout, PointerTarget};
use crate::registry::Registry;
use crate::selection::Selection;
use crate::view::{EmptyState, KEYBOARD_HINTS, PaletteView, RowView};

/// What handling an input did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The palette did not consume the input.
    Ignored,
    /// The palette opened.
    Opened,
    /// The input changed palette state (or was claimed without effect).
    Handled {
        /// The host must suppress its default handling of the input.
        prevent_default: bool,
    },
    /// The palette closed.
    Closed(PaletteAction),
}

impl Outcome {
    /// Whether the host must suppress its default handling.
    pub fn prevents_default(&self) -> bool {
        match self {
            Self::Ignored => false,
            Self::Opened | Self::Closed(_) => true,
            Self::Handled { prevent_default } => *prevent_default,
        }
    }

    /// The close action, if the palette closed.
    pub fn action(&self) -> Option<&PaletteAction> {
        match self {
            Self::Closed(action) => Some(action),
            _ => None,
        }
    }
}

/// Transient state of one open/close cycle.
#[derive(Debug)]
struct Session {
    id: SessionId,
    query: String,
    filtered: FilteredList,
    selection: Selection,
    // Pointer highlight; never moves the selection.
    hover: Option<usize>,
    scroll_offset: usize,
    focus_pending: bool,
}

type CloseCallback = Box<dyn FnMut(CloseReason)>;

/// Keyboard-driven search-and-navigate overlay.
///
/// The palette owns the registry, the navigator, and the key dispatcher.
/// The host feeds it input through [`handle_event`](Self::handle_event) or
/// the finer-grained `on_*` methods and draws [`view`](Self::view).
pub struct CommandPalette<N: Navigator> {
    registry: Registry,
    config: PaletteConfig,
    navigator: N,
    viewport: Box<dyn Viewport>,
    dispatcher: KeyDispatcher,
    on_close: Option<CloseCallback>,
    session: Option<Session>,
    sessions_started: u64,
    area: Rect,
}

impl<N: Navigator> fmt::Debug for CommandPalette<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandPalette")
            .field("entries", &self.registry.len())
            .field("config", &self.config)
            .field("dispatcher", &self.dispatcher)
            .field("session", &self.session)
            .field("area", &self.area)
            .finish_non_exhaustive()
    }
}

impl<N: Navigator> CommandPalette<N> {
    /// Create a closed palette over `registry` that navigates through `navigator`.
    ///
    /// The viewport defaults to a wide fixed width; hosts with a real
    /// viewport should call [`with_viewport`](Self::with_viewport).
    pub fn new(registry: Registry, navigator: N) -> Self {
        let config = PaletteConfig::default();
        Self {
            dispatcher: KeyDispatcher::new(ListenerHost::new(), config.breakpoint),
            registry,
            config,
            navigator,
            viewport: Box::new(FixedViewport(1280)),
            on_close: None,
            session: None,
            sessions_started: 0,
            area: Rect::from_size(80, 24),
        }
    }

    /// Set configuration (builder).
    pub fn with_config(mut self, config: PaletteConfig) -> Self {
        self.dispatcher = KeyDispatcher::new(self.dispatcher.host().clone(), config.breakpoint);
        self.config = config;
        self
    }

    /// Share a listener slot with other palettes (builder).
    pub fn with_listener_host(mut self, host: ListenerHost) -> Self {
        self.dispatcher = KeyDispatcher::new(host, self.config.breakpoint);
        self
    }

    /// Set the viewport capability (builder).
    pub fn with_viewport(mut self, viewport: impl Viewport + 'static) -> Self {
        self.viewport = Box::new(viewport);
        self
    }

    /// Set the host area used for layout and hit testing (builder).
    pub fn with_area(mut self, area: Rect) -> Self {
        self.area = area;
        self
    }

    /// Register the callback run on every close (builder).
    pub fn on_close(mut self, callback: impl FnMut(CloseReason) + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    // --- Accessors ---

    /// The registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The configuration.
    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// The navigator.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// The navigator, mutably.
    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    /// The listener slot the dispatcher attaches to.
    pub fn listener_host(&self) -> &ListenerHost {
        self.dispatcher.host()
    }

    /// Whether the palette is open.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Id of the open session.
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    /// Current query (empty when closed).
    pub fn query(&self) -> &str {
        self.session.as_ref().map_or("", |s| s.query.as_str())
    }

    /// Number of filtered results (zero when closed).
    pub fn result_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.filtered.len())
    }

    /// Highlighted position in the filtered list.
    pub fn selected_index(&self) -> Option<usize> {
        self.session.as_ref().and_then(|s| s.selection.index())
    }

    /// Filtered position under the pointer, if any.
    pub fn hovered_index(&self) -> Option<usize> {
        self.session.as_ref().and_then(|s| s.hover)
    }

    /// Highlighted entry.
    pub fn selected_entry(&self) -> Option<&Entry> {
        let session = self.session.as_ref()?;
        let n = session.selection.index()?;
        self.registry.get(session.filtered.registry_index(n)?)
    }

    /// Filtered entries in registry order (empty when closed).
    pub fn filtered_entries(&self) -> Vec<&Entry> {
        self.session
            .as_ref()
            .map(|s| s.filtered.entries(&self.registry).collect())
            .unwrap_or_default()
    }

    /// Empty-state signal: open with nothing matching.
    pub fn empty_state(&self) -> Option<EmptyState> {
        let session = self.session.as_ref()?;
        session.filtered.is_empty().then(|| EmptyState {
            suggest_rephrase: !session.query.is_empty(),
        })
    }

    /// Whether the key listener is attached.
    pub fn keyboard_enabled(&self) -> bool {
        self.dispatcher.is_attached()
    }

    /// Viewport class seen at the last attach decision.
    pub fn viewport_class(&self) -> Option<ViewportClass> {
        self.dispatcher.viewport_class()
    }

    /// First visible filtered position.
    pub fn scroll_offset(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.scroll_offset)
    }

    /// Consume the one-shot request to focus the query input.
    ///
    /// Call after the opened surface has been drawn. Returns `true` once
    /// per open.
    pub fn take_focus_request(&mut self) -> bool {
        self.session
            .as_mut()
            .is_some_and(|s| std::mem::take(&mut s.focus_pending))
    }

    // --- Open / close ---

    /// Open the palette with a fresh session.
    ///
    /// Returns `false` (and changes nothing) if it is already open.
    pub fn open(&mut self) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.sessions_started += 1;
        let id = SessionId(self.sessions_started);
        let filtered = filter::filter("", &self.registry);
        let mut selection = Selection::default();
        selection.reset_on_open(filtered.len());
        self.session = Some(Session {
            id,
            query: String::new(),
            filtered,
            selection,
            hover: None,
            scroll_offset: 0,
            focus_pending: true,
        });
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
        let keyboard = self.dispatcher.attach(id, self.viewport.as_ref());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: folio_core::logging::PALETTE_TARGET,
            event = "open",
            session = id.0,
            keyboard,
            viewport = %self.dispatcher.viewport_class().map_or("unknown", ViewportClass::label),
            results = self.result_count(),
        );
        true
    }

    /// Replace the viewport, then [`open`](Self::open).
    pub fn open_with_viewport(&mut self, viewport: impl Viewport + 'static) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.set_viewport(viewport);
        self.open()
    }

    /// Close from the host side. Returns `false` if already closed.
    pub fn close(&mut self) -> bool {
        self.close_with(CloseReason::Host)
    }

    /// Drive the palette from a boolean `is_open` input.
    pub fn set_open(&mut self, open: bool) {
        if open {
            self.open();
        } else {
            self.close();
        }
    }

    /// Open if closed, close if open.
    pub fn toggle(&mut self) -> Outcome {
        if self.close_with(CloseReason::Toggle) {
            Outcome::Closed(PaletteAction::Dismissed(CloseReason::Toggle))
        } else {
            self.open();
            Outcome::Opened
        }
    }

    fn close_with(&mut self, reason: CloseReason) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        self.dispatcher.detach();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: folio_core::logging::PALETTE_TARGET,
            event = "close",
            session = session.id.0,
            reason = reason.label(),
        );
        drop(session);

        if let Some(callback) = self.on_close.as_mut() {
            callback(reason);
        }
        true
    }

    // --- Viewport ---

    /// Replace the viewport capability. Takes effect at the next attach decision.
    pub fn set_viewport(&mut self, viewport: impl Viewport + 'static) {
        self.viewport = Box::new(viewport);
    }

    /// Re-read the viewport for the open session, attaching or detaching
    /// the key listener to match. Returns whether it is attached.
    pub fn reevaluate_viewport(&mut self) -> bool {
        match self.session.as_ref().map(|s| s.id) {
            Some(id) => self.dispatcher.attach(id, self.viewport.as_ref()),
            None => false,
        }
    }

    /// Set the host area used for layout and hit testing.
    ///
    /// The scroll offset follows, so the selection stays on screen when
    /// the area gets shorter.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        let window = self.visible_rows();
        if let Some(session) = self.session.as_mut() {
            adjust_scroll(session, window);
        }
    }

    /// Result rows that fit on screen at once.
    fn visible_rows(&self) -> usize {
        let capacity = usize::from(PaletteLayout::body_capacity(self.area));
        self.config.max_visible.min(capacity).max(1)
    }

    // --- Query ---

    /// Replace the query and recompute the results.
    ///
    /// Ignored while closed. The selection returns to the first row.
    pub fn on_query_change(&mut self, text: impl Into<String>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let text = text.into();
        if text == session.query {
            return;
        }
        session.filtered = filter::filter(&text, &self.registry);
        session.query = text;
        session.selection.reset_on_query_change(session.filtered.len());
        session.selection.select(0);
        session.hover = None;
        session.scroll_offset = 0;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: folio_core::logging::PALETTE_TARGET,
            event = "query",
            session = session.id.0,
            query_len = session.query.len(),
            results = session.filtered.len(),
        );
    }

    /// Append text to the query. Line breaks are dropped.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut query = self.query().to_owned();
        query.extend(text.chars().filter(|c| !matches!(c, '\n' | '\r')));
        self.on_query_change(query);
    }

    /// Remove the last grapheme from the query.
    pub fn backspace(&mut self) {
        let query = self.query();
        if let Some((start, _)) = query.grapheme_indices(true).next_back() {
            let shortened = query[..start].to_owned();
            self.on_query_change(shortened);
        }
    }

    // --- Keyboard ---

    /// Handle a key through the global listener.
    ///
    /// Only the bound keys (arrows, Enter, Escape) are claimed, and only
    /// while the listener is attached; anything else is [`Outcome::Ignored`].
    pub fn on_key(&mut self, event: &KeyEvent) -> Outcome {
        let Some(dispatch) = self.dispatcher.dispatch(event) else {
            return Outcome::Ignored;
        };
        let handled = Outcome::Handled {
            prevent_default: dispatch.prevent_default,
        };
        match dispatch.command {
            KeyCommand::Next => {
                self.move_selection(Selection::next);
                handled
            }
            KeyCommand::Prev => {
                self.move_selection(Selection::prev);
                handled
            }
            KeyCommand::Activate => match self.activate_selected() {
                Some(action) => Outcome::Closed(action),
                None => handled,
            },
            KeyCommand::Dismiss => {
                self.close_with(CloseReason::Escape);
                Outcome::Closed(PaletteAction::Dismissed(CloseReason::Escape))
            }
        }
    }

    fn move_selection(&mut self, step: fn(&mut Selection)) {
        let window = self.visible_rows();
        if let Some(session) = self.session.as_mut() {
            step(&mut session.selection);
            adjust_scroll(session, window);
        }
    }

    fn activate_selected(&mut self) -> Option<PaletteAction> {
        let id = self.selected_entry()?.id.clone();
        self.on_select(&id)
    }

    // --- Pointer / activation ---

    /// Activate the entry with this id.
    ///
    /// The entry must be among the current results; otherwise nothing
    /// happens and `None` is returned.
    pub fn on_select(&mut self, entry_id: &str) -> Option<PaletteAction> {
        let session = self.session.as_ref()?;
        let registry_index = self.registry.position(entry_id)?;
        session.filtered.position_of(registry_index)?;
        let entry = self.registry.get(registry_index)?;

        let action = activation::activate(entry, &mut self.navigator);

        #[cfg(feature = "tracing")]
        if let PaletteAction::Navigated { id, path } = &action {
            tracing::info!(
                target: folio_core::logging::PALETTE_TARGET,
                event = "activate",
                session = session.id.0,
                id = id.as_str(),
                path = path.as_str(),
            );
        }

        self.close_with(CloseReason::Activated);
        Some(action)
    }

    /// Handle a pointer press already resolved to a target.
    pub fn on_pointer(&mut self, target: PointerTarget) -> Outcome {
        if self.session.is_none() {
            return Outcome::Ignored;
        }
        match target {
            PointerTarget::Row(row) => {
                let entry_id = self.session.as_ref().and_then(|s| {
                    let n = s.scroll_offset + row;
                    let i = s.filtered.registry_index(n)?;
                    self.registry.get(i).map(|e| e.id.clone())
                });
                match entry_id.and_then(|id| self.on_select(&id)) {
                    Some(action) => Outcome::Closed(action),
                    None => Outcome::Handled {
                        prevent_default: false,
                    },
                }
            }
            PointerTarget::CloseButton => {
                self.close_with(CloseReason::CloseButton);
                Outcome::Closed(PaletteAction::Dismissed(CloseReason::CloseButton))
            }
            PointerTarget::Backdrop => {
                self.close_with(CloseReason::Backdrop);
                Outcome::Closed(PaletteAction::Dismissed(CloseReason::Backdrop))
            }
            PointerTarget::Surface => Outcome::Handled {
                prevent_default: false,
            },
        }
    }

    /// Hover-highlight the visible body row under the pointer.
    ///
    /// The keyboard selection is left alone, so Enter still activates the
    /// row picked with the arrows. Rows past the end of the results clear
    /// the highlight.
    pub fn hover_row(&mut self, row: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let position = session.scroll_offset + row;
        session.hover = (position < session.filtered.len()).then_some(position);
    }

    fn clear_hover(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.hover = None;
        }
    }

    // --- Event routing ---

    /// Route a canonical input event.
    ///
    /// - Ctrl+K / Super+K toggles the palette on any viewport.
    /// - Bound keys go through the global listener ([`on_key`](Self::on_key)).
    /// - Other printable keys, Backspace, Ctrl+U and pastes edit the query.
    /// - Primary clicks are hit-tested against the current layout; pointer
    ///   movement over a row hover-highlights it. Wheel and horizontal
    ///   scroll events are not claimed.
    /// - Resizes update the host area; the viewport is not re-read.
    pub fn handle_event(&mut self, event: &Event) -> Outcome {
        match event {
            Event::Key(key) if key.is_actionable() && is_open_shortcut(key) => self.toggle(),
            Event::Key(_) | Event::Paste(_) | Event::Mouse(_) if self.session.is_none() => {
                Outcome::Ignored
            }
            Event::Key(key) => match self.on_key(key) {
                Outcome::Ignored if key.is_actionable() => self.edit_query(key),
                outcome => outcome,
            },
            Event::Paste(text) => {
                self.insert_text(text);
                Outcome::Handled {
                    prevent_default: true,
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(_) if mouse.is_primary_click() => {
                    let target = self
                        .layout()
                        .map_or(PointerTarget::Backdrop, |l| l.hit_test(mouse.x, mouse.y));
                    self.on_pointer(target)
                }
                MouseEventKind::Moved => {
                    match self.layout().map(|l| l.hit_test(mouse.x, mouse.y)) {
                        Some(PointerTarget::Row(row)) => {
                            self.hover_row(row);
                            Outcome::Handled {
                                prevent_default: false,
                            }
                        }
                        _ => {
                            self.clear_hover();
                            Outcome::Ignored
                        }
                    }
                }
                _ => Outcome::Ignored,
            },
            Event::Resize { width, height } => {
                self.set_area(Rect::from_size(*width, *height));
                Outcome::Ignored
            }
            Event::Focus(_) => Outcome::Ignored,
        }
    }

    fn edit_query(&mut self, key: &KeyEvent) -> Outcome {
        let text_modifiers = key.modifiers - Modifiers::SHIFT;
        match key.code {
            KeyCode::Char('u') if text_modifiers == Modifiers::CTRL => {
                self.on_query_change(String::new());
            }
            KeyCode::Char(c) if text_modifiers.is_empty() => {
                let mut buf = [0u8; 4];
                self.insert_text(c.encode_utf8(&mut buf));
            }
            KeyCode::Backspace => self.backspace(),
            _ => return Outcome::Ignored,
        }
        Outcome::Handled {
            prevent_default: false,
        }
    }

    // --- View ---

    /// Layout of the open palette within the host area.
    pub fn layout(&self) -> Option<PaletteLayout> {
        let view = self.view()?;
        Some(PaletteLayout::compute(self.area, view.body_height()))
    }

    /// Render-ready snapshot of the open palette.
    pub fn view(&self) -> Option<PaletteView<'_>> {
        let session = self.session.as_ref()?;
        let selected = session.selection.index();
        let rows = session
            .filtered
            .indices()
            .iter()
            .enumerate()
            .skip(session.scroll_offset)
            .take(self.visible_rows())
            .filter_map(|(n, &i)| {
                self.registry.get(i).map(|entry| RowView {
                    entry,
                    selected: selected == Some(n),
                    hovered: session.hover == Some(n),
                })
            })
            .collect();
        Some(PaletteView {
            query: &session.query,
            placeholder: &self.config.placeholder,
            rows,
            empty: self.empty_state(),
            hints: if self.dispatcher.is_attached() {
                KEYBOARD_HINTS
            } else {
                &[]
            },
            scroll_offset: session.scroll_offset,
            total: session.filtered.len(),
        })
    }
}

/// Keep the selected row inside a window of `window` rows.
fn adjust_scroll(session: &mut Session, window: usize) {
    let Some(selected) = session.selection.index() else {
        session.scroll_offset = 0;
        return;
    };
    if selected < session.scroll_offset {
        session.scroll_offset = selected;
    } else if selected >= session.scroll_offset + window {
        session.scroll_offset = selected + 1 - window;
    }
}

fn is_open_shortcut(key: &KeyEvent) -> bool {
    (key.ctrl() || key.super_key()) && key.is_char_ignore_case('k')
}
