#![forbid(unsafe_code)]

//! Command palette for the folio portfolio site.
//!
//! A modal search-and-navigate overlay: the user types a query, the
//! registry is filtered by case-insensitive substring, arrows move the
//! highlight, and Enter (or a click) navigates to the chosen page and
//! closes the palette.
//!
//! # Example
//!
//! ```
//! use folio_core::event::{KeyCode, KeyEvent};
//! use folio_palette::{CommandPalette, Registry, RecordingNavigator};
//!
//! let mut palette = CommandPalette::new(Registry::portfolio(), RecordingNavigator::new());
//! palette.open();
//! palette.on_query_change("art");
//! palette.on_key(&KeyEvent::new(KeyCode::Enter));
//!
//! assert_eq!(palette.navigator().last(), Some("/artgallery"));
//! assert!(!palette.is_open());
//! ```
//!
//! # Feature flags
//!
//! - `tracing`: emit `debug`/`info` events for open, close, and activation
//!   under the `folio_palette` target.

pub mod activation;
pub mod config;
pub mod dispatcher;
pub mod entry;
pub mod filter;
pub mod layout;
pub mod palette;
pub mod registry;
pub mod selection;
pub mod view;

pub use activation::{CloseReason, Navigator, PaletteAction, RecordingNavigator};
pub use config::{ConfigError, PaletteConfig};
pub use dispatcher::{KeyCommand, KeyDispatcher, ListenerGuard, ListenerHost, SessionId};
pub use entry::{Entry, IconRef};
pub use filter::{FilteredList, filter};
pub use layout::{PaletteLayout, PointerTarget};
pub use palette::{CommandPalette, Outcome};
pub use registry::{Registry, RegistryError};
pub use selection::Selection;
pub use view::{EmptyState, PaletteView};
