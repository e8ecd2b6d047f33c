#![forbid(unsafe_code)]

//! Property tests for filtering and selection.
//!
//! 1. Results are an order-preserving subsequence of the registry.
//! 2. Every result matches the query; every non-result does not.
//! 3. The empty query returns the whole registry.
//! 4. The selection stays in range under any key sequence and query edits.

use folio_core::event::{KeyCode, KeyEvent};
use folio_palette::filter::{filter, matches};
use folio_palette::{CommandPalette, Entry, RecordingNavigator, Registry, Selection};
use proptest::prelude::*;

fn entry_strategy() -> impl Strategy<Value = (String, String, String)> {
    (
        "[A-Za-z ]{0,12}",
        "[A-Za-z ]{0,20}",
        prop::sample::select(vec!["Pages", "Labs", "Writing"]).prop_map(String::from),
    )
}

fn registry_strategy() -> impl Strategy<Value = Registry> {
    prop::collection::vec(entry_strategy(), 0..12).prop_map(|fields| {
        let entries = fields
            .into_iter()
            .enumerate()
            .map(|(i, (title, description, category))| {
                Entry::new(format!("e{i}"), title)
                    .with_description(description)
                    .with_category(category)
            })
            .collect();
        Registry::new(entries).expect("ids are unique")
    })
}

#[derive(Debug, Clone)]
enum Step {
    Down,
    Up,
    Type(char),
    Backspace,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Down),
        Just(Step::Up),
        prop::char::range('a', 'z').prop_map(Step::Type),
        Just(Step::Backspace),
    ]
}

proptest! {
    #[test]
    fn results_are_ordered_subsequence(registry in registry_strategy(), query in "[a-zA-Z ]{0,4}") {
        let result = filter(&query, &registry);
        let indices = result.indices();
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(indices.iter().all(|&i| i < registry.len()));
    }

    #[test]
    fn membership_matches_predicate(registry in registry_strategy(), query in "[a-zA-Z]{0,3}") {
        let result = filter(&query, &registry);
        for (i, entry) in registry.iter().enumerate() {
            prop_assert_eq!(result.position_of(i).is_some(), matches(entry, &query));
        }
    }

    #[test]
    fn empty_query_is_identity(registry in registry_strategy()) {
        let result = filter("", &registry);
        let all: Vec<usize> = (0..registry.len()).collect();
        prop_assert_eq!(result.indices(), all.as_slice());
    }

    #[test]
    fn case_does_not_matter(registry in registry_strategy(), query in "[a-zA-Z]{1,3}") {
        prop_assert_eq!(
            filter(&query.to_uppercase(), &registry),
            filter(&query.to_lowercase(), &registry)
        );
    }

    #[test]
    fn selection_stays_in_range(len in 0usize..20, moves in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut selection = Selection::new(len);
        for down in moves {
            if down { selection.next() } else { selection.prev() }
            match selection.index() {
                Some(i) => prop_assert!(i < len),
                None => prop_assert_eq!(len, 0),
            }
        }
    }

    #[test]
    fn palette_selection_tracks_results(
        registry in registry_strategy(),
        steps in prop::collection::vec(step_strategy(), 0..30),
    ) {
        let mut palette = CommandPalette::new(registry, RecordingNavigator::new());
        palette.open();
        for step in steps {
            match step {
                Step::Down => { palette.on_key(&KeyEvent::new(KeyCode::Down)); }
                Step::Up => { palette.on_key(&KeyEvent::new(KeyCode::Up)); }
                Step::Type(c) => palette.insert_text(&c.to_string()),
                Step::Backspace => palette.backspace(),
            }
            let count = palette.result_count();
            match palette.selected_index() {
                Some(i) => prop_assert!(i < count),
                None => prop_assert_eq!(count, 0),
            }
            prop_assert_eq!(palette.empty_state().is_some(), count == 0);
        }
        prop_assert!(palette.navigator().visited().is_empty());
    }
}
