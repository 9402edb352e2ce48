//! Property-based tests for the Catalog Filter Engine
//!
//! Tests invariants:
//! - Output is an order-preserving subsequence of the input
//! - Every returned entry matches, every omitted entry does not
//! - A returned entry contains the trimmed, lowercased query in its title or
//!   a tag; an omitted entry contains it nowhere
//! - The default state is the identity
//! - Filtering is idempotent
//! - Whitespace padding and ASCII case in the query are ignored
//! - Chip counts equal the size of the filtered collection

use proptest::prelude::*;

use crate::core::catalog::filter::{category_chips, filter, matches, FilterState, ALL};
use crate::core::catalog::CatalogEntry;
use crate::tests::common::{create_test_entry, TestEntry};

// ============================================================================
// Strategies
// ============================================================================

static CATEGORIES: [&str; 3] = ["web", "mobile", "design"];
static TAGS: [&str; 5] = ["react", "api", "figma", "maps", "flutter"];

fn arb_entries() -> impl Strategy<Value = Vec<TestEntry>> {
    arb_entries_sized(0..12)
}

fn arb_entries_sized(size: std::ops::Range<usize>) -> impl Strategy<Value = Vec<TestEntry>> {
    prop::collection::vec(
        (
            "[A-Za-z ]{1,16}",
            prop::sample::select(&CATEGORIES[..]),
            prop::sample::subsequence(&TAGS[..], 0..3),
        ),
        size,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (title, category, tags))| {
                create_test_entry(i as u32 + 1, &title, category, &tags)
            })
            .collect()
    })
}

fn arb_category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(ALL.to_string()),
        prop::sample::select(&CATEGORIES[..]).prop_map(str::to_string),
        prop::sample::select(&TAGS[..]).prop_map(str::to_string),
    ]
}

/// Entries plus a query cut from one of their titles or tags, so hits occur.
fn arb_entries_with_hit() -> impl Strategy<Value = (Vec<TestEntry>, String)> {
    arb_entries_sized(1..12).prop_flat_map(|entries| {
        let sources: Vec<String> = entries
            .iter()
            .flat_map(|e| std::iter::once(e.title.clone()).chain(e.tags.iter().cloned()))
            .collect();
        let query = (
            prop::sample::select(sources),
            any::<prop::sample::Index>(),
            any::<prop::sample::Index>(),
        )
            .prop_map(|(source, a, b)| {
                let (a, b) = (a.index(source.len()), b.index(source.len()));
                source[a.min(b)..=a.max(b)].to_string()
            });
        (Just(entries), query)
    })
}

/// Plain substring check over the title and tags, written out by hand.
fn contains_query(entry: &TestEntry, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    entry.title.to_lowercase().contains(&needle)
        || entry.tags.iter().any(|t| t.to_lowercase().contains(&needle))
}

fn ids(entries: &[&TestEntry]) -> Vec<u32> {
    entries.iter().map(|e| e.id).collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: the default state shows every entry in catalog order
    #[test]
    fn prop_default_state_is_identity(entries in arb_entries()) {
        let visible = filter(&entries, &FilterState::new());
        let expected: Vec<u32> = entries.iter().map(|e| e.id).collect();
        prop_assert_eq!(ids(&visible), expected);
    }

    /// Property: results are exactly the matching entries, in order
    #[test]
    fn prop_filter_is_ordered_exact_subset(
        entries in arb_entries(),
        category in arb_category(),
        query in "[a-z]{0,4}",
    ) {
        let state = FilterState::new().with_category(category).with_query(query);
        let visible = filter(&entries, &state);

        let expected: Vec<u32> = entries
            .iter()
            .filter(|e| matches(*e, &state))
            .map(|e| e.id)
            .collect();
        prop_assert_eq!(ids(&visible), expected);
        prop_assert!(visible.len() <= entries.len());
    }

    /// Property: with no category, results are exactly the entries whose
    /// title or tags contain the query
    #[test]
    fn prop_query_hits_checked_against_fields(
        (entries, query) in arb_entries_with_hit(),
        shout in any::<bool>(),
        pad in " {0,2}",
    ) {
        let typed = if shout { query.to_uppercase() } else { query.clone() };
        let state = FilterState::new().with_query(format!("{pad}{typed}{pad}"));
        let visible = filter(&entries, &state);
        let shown = ids(&visible);

        prop_assert!(!visible.is_empty(), "query {:?} was cut from an entry", query);
        for entry in &entries {
            prop_assert_eq!(
                shown.contains(&entry.id),
                contains_query(entry, &query),
                "entry {} for query {:?}", entry.id, query
            );
        }
    }

    /// Property: filtering an already filtered list changes nothing
    #[test]
    fn prop_filter_idempotent(
        entries in arb_entries(),
        category in arb_category(),
        query in "[a-z]{0,3}",
    ) {
        let state = FilterState::new().with_category(category).with_query(query);
        let once: Vec<TestEntry> = filter(&entries, &state).into_iter().cloned().collect();
        let twice = filter(&once, &state);
        let expected: Vec<u32> = once.iter().map(|e| e.id).collect();
        prop_assert_eq!(ids(&twice), expected);
    }

    /// Property: surrounding whitespace in the query is ignored
    #[test]
    fn prop_query_padding_ignored(
        entries in arb_entries(),
        query in "[a-z]{1,4}",
        left in " {0,3}",
        right in " {0,3}",
    ) {
        let plain = FilterState::new().with_query(query.clone());
        let padded = FilterState::new().with_query(format!("{left}{query}{right}"));
        prop_assert_eq!(ids(&filter(&entries, &plain)), ids(&filter(&entries, &padded)));
    }

    /// Property: query matching is case-insensitive
    #[test]
    fn prop_query_case_insensitive(entries in arb_entries(), query in "[a-z]{1,4}") {
        let lower = FilterState::new().with_query(query.clone());
        let upper = FilterState::new().with_query(query.to_uppercase());
        prop_assert_eq!(ids(&filter(&entries, &lower)), ids(&filter(&entries, &upper)));
    }

    /// Property: a blank query never hides anything the category allows
    #[test]
    fn prop_blank_query_only_filters_by_category(
        entries in arb_entries(),
        category in arb_category(),
        blank in "[ \t]{0,4}",
    ) {
        let state = FilterState::new().with_category(category.clone()).with_query(blank);
        let visible = filter(&entries, &state);
        let expected: Vec<u32> = entries
            .iter()
            .filter(|e| e.matches_category(&category))
            .map(|e| e.id)
            .collect();
        prop_assert_eq!(ids(&visible), expected);
    }

    /// Property: each chip count equals the number of entries that chip shows
    #[test]
    fn prop_chip_counts_agree_with_filter(entries in arb_entries()) {
        let chips = category_chips(&entries);
        prop_assert_eq!(chips.len(), TestEntry::CATEGORIES.len() + 1);
        prop_assert_eq!(chips[0].value, ALL);
        prop_assert_eq!(chips[0].count, entries.len());

        for chip in &chips {
            let state = FilterState::new().with_category(chip.value);
            prop_assert_eq!(chip.count, filter(&entries, &state).len());
        }
    }

    /// Property: reset always returns to the identity state
    #[test]
    fn prop_reset_restores_default(category in arb_category(), query in ".{0,8}") {
        let mut state = FilterState::new().with_category(category).with_query(query);
        state.reset();
        prop_assert!(state.is_default());
        prop_assert_eq!(state.category.as_str(), ALL);
        prop_assert!(state.query.is_empty());
    }
}
