//! Category + free-text filtering over any [`CatalogEntry`] collection.
//!
//! Filtering is pure and order-preserving: the result is always a
//! subsequence of the input. It never fails; the worst case is an empty
//! result, which the section renders as an empty state with a reset action.

use super::CatalogEntry;

/// Category sentinel that disables the category axis.
pub const ALL: &str = "all";

/// The `(category, query)` pair a section filters by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Either [`ALL`] or a category/tag value.
    pub category: String,
    /// Raw user input. Matched trimmed and case-insensitively.
    pub query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: ALL.to_string(),
            query: String::new(),
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// "Show all": back to `all` with an empty query.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        self.category == ALL && self.query.trim().is_empty()
    }

    /// Trimmed, lower-cased query, or `None` when the text axis is inactive.
    fn needle(&self) -> Option<String> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }
}

/// Whether a single entry passes both axes of `state`.
pub fn matches<T: CatalogEntry>(entry: &T, state: &FilterState) -> bool {
    entry.matches_category(&state.category) && matches_text(entry, state.needle().as_deref())
}

fn matches_text<T: CatalogEntry>(entry: &T, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => entry
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle)),
    }
}

/// Visible subset of `entries` under `state`, in catalog order.
pub fn filter<'a, T: CatalogEntry>(entries: &'a [T], state: &FilterState) -> Vec<&'a T> {
    let needle = state.needle();
    entries
        .iter()
        .filter(|entry| {
            entry.matches_category(&state.category) && matches_text(*entry, needle.as_deref())
        })
        .collect()
}

/// A filter chip: `(value, label, count)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChip {
    pub value: &'static str,
    pub label: &'static str,
    pub count: usize,
}

/// The `All` chip followed by every declared category, each with the number
/// of entries it would select from the full collection.
pub fn category_chips<T: CatalogEntry>(entries: &[T]) -> Vec<CategoryChip> {
    std::iter::once((ALL, "All"))
        .chain(T::CATEGORIES.iter().copied())
        .map(|(value, label)| CategoryChip {
            value,
            label,
            count: entries.iter().filter(|e| e.matches_category(value)).count(),
        })
        .collect()
}
