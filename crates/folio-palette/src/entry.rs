#![forbid(unsafe_code)]

//! Navigable entries.

use std::fmt;

/// Opaque icon tag carried through to the host's icon renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IconRef(String);

impl IconRef {
    /// Wrap an icon name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The icon name as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single navigable target listed by the palette.
///
/// Entries are immutable once they are in a [`Registry`](crate::Registry);
/// the registry only hands out shared references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Unique identifier, also the last segment of the navigation path.
    pub id: String,
    /// Display title (searched).
    pub title: String,
    /// One-line description (searched).
    pub description: String,
    /// Grouping label shown as a badge (searched).
    pub category: String,
    /// Icon tag, never interpreted here.
    pub icon: IconRef,
}

impl Entry {
    /// Create an entry with empty description, category and icon.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            icon: IconRef::default(),
        }
    }

    /// Set description (builder).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set category (builder).
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set icon (builder).
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = IconRef::new(icon);
        self
    }

    /// The three searchable fields, in match order.
    pub fn searchable_fields(&self) -> [&str; 3] {
        [&self.title, &self.description, &self.category]
    }
}
