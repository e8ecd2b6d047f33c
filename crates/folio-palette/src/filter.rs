#![forbid(unsafe_code)]

//! Case-insensitive substring filter.
//!
//! An entry matches when the lowercased query is a substring of its
//! lowercased title, description, or category. Results keep registry order;
//! nothing is scored or re-ranked. The empty query matches everything.

use crate::entry::Entry;
use crate::registry::Registry;

/// Registry positions of the entries matching a query, in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilteredList {
    indices: Vec<usize>,
}

impl FilteredList {
    /// Number of matches.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Registry position of the `n`th match.
    pub fn registry_index(&self, n: usize) -> Option<usize> {
        self.indices.get(n).copied()
    }

    /// Position within the list of the match at this registry position.
    pub fn position_of(&self, registry_index: usize) -> Option<usize> {
        self.indices.iter().position(|&i| i == registry_index)
    }

    /// Registry positions in order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Resolve the matches against the registry they were computed from.
    pub fn entries<'r>(&'r self, registry: &'r Registry) -> impl Iterator<Item = &'r Entry> + 'r {
        self.indices.iter().filter_map(|&i| registry.get(i))
    }
}

/// Whether `entry` matches an already-lowercased query.
pub fn matches_lowercase(entry: &Entry, needle: &str) -> bool {
    needle.is_empty()
        || entry
            .searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Whether `entry` matches `query`, ignoring case.
pub fn matches(entry: &Entry, query: &str) -> bool {
    matches_lowercase(entry, &query.to_lowercase())
}

/// Reduce `registry` to the entries matching `query`.
pub fn filter(query: &str, registry: &Registry) -> FilteredList {
    let needle = query.to_lowercase();
    let indices = registry
        .iter()
        .enumerate()
        .filter(|(_, entry)| matches_lowercase(entry, &needle))
        .map(|(i, _)| i)
        .collect();
    FilteredList { indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'r>(list: &'r FilteredList, registry: &'r Registry) -> Vec<&'r str> {
        list.entries(registry).map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let registry = Registry::portfolio();
        let list = filter("", &registry);
        assert_eq!(ids(&list, &registry), ["projects", "artgallery"]);
    }

    #[test]
    fn art_matches_title_and_description_once() {
        let registry = Registry::portfolio();
        let list = filter("art", &registry);
        assert_eq!(ids(&list, &registry), ["artgallery"]);
    }

    #[test]
    fn case_is_ignored_on_both_sides() {
        let registry = Registry::portfolio();
        assert_eq!(ids(&filter("PROJ", &registry), &registry), ["projects"]);
        assert_eq!(ids(&filter("gAlLeRy", &registry), &registry), ["artgallery"]);
    }

    #[test]
    fn category_match_keeps_registry_order() {
        let registry = Registry::portfolio();
        assert_eq!(
            ids(&filter("pages", &registry), &registry),
            ["projects", "artgallery"]
        );
    }

    #[test]
    fn unmatched_query_is_empty() {
        let registry = Registry::portfolio();
        let list = filter("xyz123", &registry);
        assert!(list.is_empty());
        assert_eq!(list.registry_index(0), None);
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        let registry = Registry::portfolio();
        // Both descriptions contain a single space.
        assert_eq!(
            ids(&filter(" ", &registry), &registry),
            ["projects", "artgallery"]
        );
        assert!(filter("  ", &registry).is_empty());
    }

    #[test]
    fn position_of_maps_back() {
        let registry = Registry::portfolio();
        let list = filter("", &registry);
        assert_eq!(list.position_of(1), Some(1));
        let narrowed = filter("art", &registry);
        assert_eq!(narrowed.position_of(1), Some(0));
        assert_eq!(narrowed.position_of(0), None);
    }

    #[test]
    fn non_ascii_case_folding() {
        let registry = Registry::new(vec![Entry::new("cafe", "Ÿ Café")]).unwrap();
        assert!(matches(registry.get(0).unwrap(), "ÿ CAFÉ"));
    }
}
