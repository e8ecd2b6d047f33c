#![forbid(unsafe_code)]

//! Turning a chosen entry into navigation and a close signal.

use std::fmt;

use crate::entry::Entry;

/// Fire-and-forget navigation capability supplied by the host router.
pub trait Navigator {
    /// Navigate to an absolute site path such as `/projects`.
    fn navigate(&mut self, path: &str);
}

impl<F: FnMut(&str)> Navigator for F {
    fn navigate(&mut self, path: &str) {
        self(path)
    }
}

/// A navigator that remembers every path it was asked to visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingNavigator {
    visited: Vec<String>,
}

impl RecordingNavigator {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths in the order they were requested.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Most recent path.
    pub fn last(&self) -> Option<&str> {
        self.visited.last().map(String::as_str)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, path: &str) {
        self.visited.push(path.to_owned());
    }
}

/// Why the palette closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// An entry was activated.
    Activated,
    /// Escape was pressed.
    Escape,
    /// The backdrop outside the surface was clicked.
    Backdrop,
    /// The header close button was clicked.
    CloseButton,
    /// The open shortcut was pressed again.
    Toggle,
    /// The host closed the palette directly.
    Host,
}

impl CloseReason {
    /// Short label for logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Activated => "activated",
            Self::Escape => "escape",
            Self::Backdrop => "backdrop",
            Self::CloseButton => "close_button",
            Self::Toggle => "toggle",
            Self::Host => "host",
        }
    }

    /// Whether the close came with a navigation.
    pub const fn is_activation(self) -> bool {
        matches!(self, Self::Activated)
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome reported to the host when the palette closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    /// An entry was activated and navigation was dispatched.
    Navigated {
        /// Entry id.
        id: String,
        /// Path handed to the navigator.
        path: String,
    },
    /// The palette closed without activation.
    Dismissed(CloseReason),
}

impl PaletteAction {
    /// The close reason behind this action.
    pub fn close_reason(&self) -> CloseReason {
        match self {
            Self::Navigated { .. } => CloseReason::Activated,
            Self::Dismissed(reason) => *reason,
        }
    }
}

/// Site path for an entry: `/` followed by its id.
pub fn route_for(entry: &Entry) -> String {
    format!("/{}", entry.id)
}

/// Dispatch navigation for `entry` and describe the result.
///
/// The caller owns closing the session; this only performs the side effect.
pub fn activate(entry: &Entry, navigator: &mut dyn Navigator) -> PaletteAction {
    let path = route_for(entry);
    navigator.navigate(&path);
    PaletteAction::Navigated {
        id: entry.id.clone(),
        path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn routes_are_id_paths() {
        let registry = Registry::portfolio();
        let routes: Vec<String> = registry.iter().map(route_for).collect();
        assert_eq!(routes, ["/projects", "/artgallery"]);
    }

    #[test]
    fn activate_navigates_once() {
        let registry = Registry::portfolio();
        let mut nav = RecordingNavigator::new();
        let action = activate(registry.get(1).unwrap(), &mut nav);
        assert_eq!(nav.visited(), ["/artgallery"]);
        assert_eq!(
            action,
            PaletteAction::Navigated {
                id: "artgallery".into(),
                path: "/artgallery".into()
            }
        );
        assert_eq!(action.close_reason(), CloseReason::Activated);
    }

    #[test]
    fn closures_are_navigators() {
        let mut seen = Vec::new();
        {
            let mut nav = |path: &str| seen.push(path.to_owned());
            activate(&Entry::new("projects", "Projects"), &mut nav);
        }
        assert_eq!(seen, ["/projects"]);
    }

    #[test]
    fn only_activated_is_activation() {
        assert!(CloseReason::Activated.is_activation());
        for reason in [
            CloseReason::Escape,
            CloseReason::Backdrop,
            CloseReason::CloseButton,
            CloseReason::Toggle,
            CloseReason::Host,
        ] {
            assert!(!reason.is_activation(), "{reason}");
        }
    }
}
