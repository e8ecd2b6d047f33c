#![forbid(unsafe_code)]

//! The fixed, ordered catalog of entries.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::entry::Entry;

/// Why a registry could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The entry at this position has an empty id.
    EmptyId {
        /// Position in the input list.
        index: usize,
    },
    /// Two entries share an id.
    DuplicateId {
        /// The repeated id.
        id: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId { index } => write!(f, "entry {index} has an empty id"),
            Self::DuplicateId { id } => write!(f, "duplicate entry id: {id}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Read-only, ordered list of entries.
///
/// Cloning is cheap: clones share the same entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    entries: Rc<[Entry]>,
}

impl Registry {
    /// Build a registry, rejecting empty or repeated ids.
    pub fn new(entries: Vec<Entry>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.id.is_empty() {
                return Err(RegistryError::EmptyId { index });
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(RegistryError::DuplicateId {
                    id: entry.id.clone(),
                });
            }
        }
        Ok(Self {
            entries: entries.into(),
        })
    }

    /// The portfolio site's catalog.
    pub fn portfolio() -> Self {
        Self {
            entries: Rc::from(vec![
                Entry::new("projects", "Projects")
                    .with_description("View my projects")
                    .with_category("Pages")
                    .with_icon("folder"),
                Entry::new("artgallery", "Art Gallery")
                    .with_description("Animated coding components")
                    .with_category("Pages")
                    .with_icon("palette"),
            ]),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a registry position.
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Position of the entry with this id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Entries in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Entries as a slice.
    pub fn as_slice(&self) -> &[Entry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_catalog_order() {
        let registry = Registry::portfolio();
        let ids: Vec<&str> = registry.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["projects", "artgallery"]);
        assert_eq!(registry.get(1).map(|e| e.icon.as_str()), Some("palette"));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = Registry::new(vec![Entry::new("a", "A"), Entry::new("a", "Again")]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId { id: "a".into() });
        assert_eq!(err.to_string(), "duplicate entry id: a");
    }

    #[test]
    fn empty_id_rejected() {
        let err = Registry::new(vec![Entry::new("a", "A"), Entry::new("", "Blank")]).unwrap_err();
        assert_eq!(err, RegistryError::EmptyId { index: 1 });
    }

    #[test]
    fn empty_registry_is_valid() {
        let registry = Registry::new(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.position("projects"), None);
    }

    #[test]
    fn clones_share_entries() {
        let a = Registry::portfolio();
        let b = a.clone();
        assert!(std::ptr::eq(a.as_slice(), b.as_slice()));
    }
}
