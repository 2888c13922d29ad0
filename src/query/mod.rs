//! Table query engine: search, sort and paginate citers.
//!
//! [`query`] is a pure function from a record slice and a [`QueryState`] to a
//! [`QueryResult`]. It never fails: out-of-range page indices yield an empty
//! page and a zero page size or index is treated as 1.
//!
//! ```
//! use meritpath::models::{Citer, QueryState, SortDirection, SortKey};
//! use meritpath::query::query;
//!
//! let citers = vec![
//!     Citer::new("1", "Dr. Sarah Johnson", "Stanford University", 342),
//!     Citer::new("2", "Prof. Michael Chen", "MIT", 287),
//! ];
//! let state = QueryState::new()
//!     .search_text("stanford")
//!     .sort(SortKey::Name, SortDirection::Ascending);
//!
//! let result = query(&citers, &state);
//! assert_eq!(result.matched_count, 1);
//! assert_eq!(result.citation_sum, 342);
//! ```

mod collate;

pub use collate::collate;

use std::cmp::Ordering;

use crate::models::{Citer, QueryResult, QueryState, SortDirection, SortKey};

/// Run a query over `records` and return the requested page
pub fn query(records: &[Citer], state: &QueryState) -> QueryResult {
    let page_size = state.page_size.max(1);
    let page_index = state.page_index.max(1);

    let mut matched: Vec<&Citer> = records
        .iter()
        .filter(|citer| matches(citer, &state.search_text))
        .collect();

    // Stable sort; direction flips the comparator so ties keep input order
    matched.sort_by(|a, b| {
        let ordering = compare(a, b, state.sort_key);
        match state.sort_direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    let matched_count = matched.len();
    let total_pages = matched_count.div_ceil(page_size).max(1);
    let citation_sum = matched.iter().map(|c| c.citation_count).sum();

    let start = (page_index - 1).saturating_mul(page_size);
    let page = matched
        .iter()
        .skip(start)
        .take(page_size)
        .map(|c| (*c).clone())
        .collect();

    tracing::trace!(
        search = %state.search_text,
        sort_key = ?state.sort_key,
        direction = ?state.sort_direction,
        page_index,
        page_size,
        matched_count,
        "Computed citers page"
    );

    QueryResult {
        page,
        matched_count,
        total_count: records.len(),
        total_pages,
        citation_sum,
        page_index,
        page_size,
    }
}

/// Whether `citer` matches the search text (case-insensitive substring)
///
/// The text is matched literally, surrounding whitespace included.
pub fn matches(citer: &Citer, search_text: &str) -> bool {
    if search_text.is_empty() {
        return true;
    }
    let needle = search_text.to_lowercase();
    citer.name.to_lowercase().contains(&needle)
        || citer.affiliation.to_lowercase().contains(&needle)
}

/// Ascending comparison of two citers by `key`
pub fn compare(a: &Citer, b: &Citer, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => collate(&a.name, &b.name),
        SortKey::Affiliation => collate(&a.affiliation, &b.affiliation),
        SortKey::CitationCount => a.citation_count.cmp(&b.citation_count),
    }
}
