#![forbid(unsafe_code)]

//! Global key listener, scoped to an open palette session.
//!
//! A [`ListenerHost`] stands in for the document-level key listener slot.
//! At most one listener is attached at a time. [`ListenerHost::attach`]
//! hands out a [`ListenerGuard`]; dropping the guard detaches, so no exit
//! path of a session can leave a listener behind.
//!
//! [`KeyDispatcher`] decides whether to attach at all (wide viewports only)
//! and translates key presses into [`KeyCommand`]s while attached.
//!
//! | Key       | Command    |
//! |-----------|------------|
//! | ArrowDown | `Next`     |
//! | ArrowUp   | `Prev`     |
//! | Enter     | `Activate` |
//! | Escape    | `Dismiss`  |

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use folio_core::event::{KeyCode, KeyEvent};
use folio_core::viewport::{Breakpoint, Viewport, ViewportClass};

/// Identifies one open/close cycle of a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

#[derive(Debug, Default)]
struct HostState {
    owner: Cell<Option<SessionId>>,
    attaches: Cell<u64>,
    detaches: Cell<u64>,
}

/// The single global key-listener slot.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct ListenerHost {
    state: Rc<HostState>,
}

impl ListenerHost {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener for `session`.
    ///
    /// Returns `None` if another session's listener is still attached.
    #[must_use = "the listener detaches when the guard is dropped"]
    pub fn attach(&self, session: SessionId) -> Option<ListenerGuard> {
        if self.state.owner.get().is_some() {
            return None;
        }
        self.state.owner.set(Some(session));
        self.state.attaches.set(self.state.attaches.get() + 1);
        Some(ListenerGuard {
            state: Rc::clone(&self.state),
            session,
        })
    }

    /// Session currently holding the slot.
    pub fn owner(&self) -> Option<SessionId> {
        self.state.owner.get()
    }

    /// Whether any listener is attached.
    pub fn is_attached(&self) -> bool {
        self.state.owner.get().is_some()
    }

    /// Total attachments over the host's lifetime.
    pub fn attach_count(&self) -> u64 {
        self.state.attaches.get()
    }

    /// Total detachments over the host's lifetime.
    pub fn detach_count(&self) -> u64 {
        self.state.detaches.get()
    }
}

/// Proof of an attached listener. Detaches on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    state: Rc<HostState>,
    session: SessionId,
}

impl ListenerGuard {
    /// Session that owns this listener.
    pub fn session(&self) -> SessionId {
        self.session
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if self.state.owner.get() == Some(self.session) {
            self.state.owner.set(None);
            self.state.detaches.set(self.state.detaches.get() + 1);
        }
    }
}

/// What a bound key asks the palette to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    /// Highlight the next row.
    Next,
    /// Highlight the previous row.
    Prev,
    /// Activate the highlighted row.
    Activate,
    /// Close without activating.
    Dismiss,
}

impl KeyCommand {
    /// Look up the command bound to a key, if any.
    ///
    /// Releases are never bound. Modifiers are ignored.
    pub fn from_key(event: &KeyEvent) -> Option<Self> {
        if !event.is_actionable() {
            return None;
        }
        match event.code {
            KeyCode::Down => Some(Self::Next),
            KeyCode::Up => Some(Self::Prev),
            KeyCode::Enter => Some(Self::Activate),
            KeyCode::Escape => Some(Self::Dismiss),
            _ => None,
        }
    }
}

/// A key the listener claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// The command to run.
    pub command: KeyCommand,
    /// The host must suppress its default handling of the key.
    pub prevent_default: bool,
}

/// Attaches the key listener for wide viewports and translates bound keys.
#[derive(Debug)]
pub struct KeyDispatcher {
    host: ListenerHost,
    breakpoint: Breakpoint,
    guard: Option<ListenerGuard>,
    class: Option<ViewportClass>,
}

impl KeyDispatcher {
    /// Create a detached dispatcher using `host`'s listener slot.
    pub fn new(host: ListenerHost, breakpoint: Breakpoint) -> Self {
        Self {
            host,
            breakpoint,
            guard: None,
            class: None,
        }
    }

    /// Read the viewport once and attach for `session` if it is wide.
    ///
    /// Narrow viewports detach any existing listener. Returns whether a
    /// listener is attached afterwards.
    pub fn attach(&mut self, session: SessionId, viewport: &dyn Viewport) -> bool {
        let class = self.breakpoint.classify_viewport(viewport);
        self.class = Some(class);
        if !class.allows_shortcuts() {
            self.detach_guard();
            return false;
        }
        if self
            .guard
            .as_ref()
            .is_some_and(|guard| guard.session() == session)
        {
            return true;
        }
        self.detach_guard();
        self.guard = self.host.attach(session);
        match &self.guard {
            Some(_) => {
                folio_core::debug!(
                    target: folio_core::logging::PALETTE_TARGET,
                    event = "attach",
                    session = session.0,
                );
                true
            }
            None => {
                folio_core::warn!(
                    target: folio_core::logging::PALETTE_TARGET,
                    event = "attach_refused",
                    session = session.0,
                    owner = ?self.host.owner(),
                );
                false
            }
        }
    }

    /// Drop the listener, if attached.
    pub fn detach(&mut self) {
        self.detach_guard();
        self.class = None;
    }

    fn detach_guard(&mut self) {
        if let Some(guard) = self.guard.take() {
            folio_core::debug!(
                target: folio_core::logging::PALETTE_TARGET,
                event = "detach",
                session = guard.session().0,
            );
            drop(guard);
        }
    }

    /// Whether this dispatcher holds the listener.
    pub fn is_attached(&self) -> bool {
        self.guard.is_some()
    }

    /// Viewport class observed at the last attach decision.
    pub fn viewport_class(&self) -> Option<ViewportClass> {
        self.class
    }

    /// The listener slot this dispatcher attaches to.
    pub fn host(&self) -> &ListenerHost {
        &self.host
    }

    /// Translate a key while attached. Detached dispatchers claim nothing.
    pub fn dispatch(&self, event: &KeyEvent) -> Option<Dispatch> {
        self.guard.as_ref()?;
        KeyCommand::from_key(event).map(|command| Dispatch {
            command,
            prevent_default: true,
        })
    }
}
