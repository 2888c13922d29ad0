//! Query state and result models for the citers table.

use serde::{Deserialize, Serialize};

use crate::models::Citer;

/// Page sizes offered by the page-size selector
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 15, 20];

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Column the table is sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Affiliation,
    #[default]
    CitationCount,
}

impl SortKey {
    /// All sortable columns, in display order
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::Affiliation, SortKey::CitationCount];

    /// Column header label
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Affiliation => "Affiliation",
            SortKey::CitationCount => "Total Citations",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown next to the active column header
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Search, sort and pagination configuration driving the visible page
///
/// Owned by a single view. Every interaction goes through one of the
/// `set_*` / paging methods, which keep `page_index` consistent with the
/// behavior users expect (a new search or page size starts from page 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Free-text filter over name and affiliation
    pub search_text: String,

    /// Column to sort by
    pub sort_key: SortKey,

    /// Sort direction
    pub sort_direction: SortDirection,

    /// 1-based page index
    pub page_index: usize,

    /// Rows per page
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryState {
    /// Create a query state with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search text
    pub fn search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Set sort column and direction
    pub fn sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_key = key;
        self.sort_direction = direction;
        self
    }

    /// Set page index
    pub fn page_index(mut self, index: usize) -> Self {
        self.page_index = index;
        self
    }

    /// Set page size
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    // ========== TRANSITIONS ==========

    /// Replace the search text and go back to the first page
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page_index = 1;
    }

    /// Sort by `key`, toggling direction when it is already the sort column
    ///
    /// A newly selected column always starts ascending. The page index is
    /// left untouched.
    pub fn set_sort(&mut self, key: SortKey) {
        if key == self.sort_key {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_key = key;
            self.sort_direction = SortDirection::Ascending;
        }
    }

    /// Replace the page size and go back to the first page
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page_index = 1;
    }

    /// Advance one page; no-op on the last page
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page_index < total_pages.max(1) {
            self.page_index += 1;
        }
    }

    /// Go back one page; no-op on the first page
    pub fn prev_page(&mut self) {
        if self.page_index > 1 {
            self.page_index -= 1;
        }
    }

    /// Clamp the page index into `[1, max(1, total_pages)]`
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.page_index = self.page_index.clamp(1, total_pages.max(1));
    }
}

/// The visible page plus aggregate metadata over the matched set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Records on the requested page, in sorted order
    pub page: Vec<Citer>,

    /// Number of records matching the search text
    pub matched_count: usize,

    /// Number of input records
    pub total_count: usize,

    /// Number of pages, at least 1
    pub total_pages: usize,

    /// Sum of citation counts over the whole matched set
    pub citation_sum: u64,

    /// Effective page index used for slicing
    pub page_index: usize,

    /// Effective page size used for slicing
    pub page_size: usize,
}

impl QueryResult {
    /// Offset of the first row of this page within the matched set
    pub fn start_index(&self) -> usize {
        self.page_index.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Whether a previous page exists
    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    /// Whether a next page exists
    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages
    }

    /// Whether the search matched nothing
    pub fn is_empty(&self) -> bool {
        self.matched_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = QueryState::default();
        assert_eq!(state.search_text, "");
        assert_eq!(state.sort_key, SortKey::CitationCount);
        assert_eq!(state.sort_direction, SortDirection::Descending);
        assert_eq!(state.page_index, 1);
        assert_eq!(state.page_size, 10);
    }

    #[test]
    fn test_set_search_text_resets_page() {
        let mut state = QueryState::new().page_index(3);
        state.set_search_text("oxford");
        assert_eq!(state.search_text, "oxford");
        assert_eq!(state.page_index, 1);
    }

    #[test]
    fn test_set_sort_toggles_same_key() {
        let mut state = QueryState::new();
        state.set_sort(SortKey::Name);
        assert_eq!(state.sort_key, SortKey::Name);
        assert_eq!(state.sort_direction, SortDirection::Ascending);

        state.set_sort(SortKey::Name);
        assert_eq!(state.sort_key, SortKey::Name);
        assert_eq!(state.sort_direction, SortDirection::Descending);

        state.set_sort(SortKey::Name);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_set_sort_keeps_page() {
        let mut state = QueryState::new().page_index(2);
        state.set_sort(SortKey::Affiliation);
        assert_eq!(state.page_index, 2);
    }

    #[test]
    fn test_set_sort_on_current_key_toggles_default_direction() {
        let mut state = QueryState::new();
        state.set_sort(SortKey::CitationCount);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_set_page_size() {
        let mut state = QueryState::new().page_index(2);
        state.set_page_size(5);
        assert_eq!(state.page_size, 5);
        assert_eq!(state.page_index, 1);

        state.set_page_size(0);
        assert_eq!(state.page_size, 1);
    }

    #[test]
    fn test_paging_boundaries() {
        let mut state = QueryState::new();
        state.prev_page();
        assert_eq!(state.page_index, 1);

        state.next_page(2);
        assert_eq!(state.page_index, 2);
        state.next_page(2);
        assert_eq!(state.page_index, 2);

        state.prev_page();
        assert_eq!(state.page_index, 1);
    }

    #[test]
    fn test_next_page_with_no_pages() {
        let mut state = QueryState::new();
        state.next_page(0);
        assert_eq!(state.page_index, 1);
    }

    #[test]
    fn test_clamp_page() {
        let mut state = QueryState::new().page_index(4);
        state.clamp_page(2);
        assert_eq!(state.page_index, 2);

        let mut state = QueryState::new().page_index(0);
        state.clamp_page(0);
        assert_eq!(state.page_index, 1);
    }

    #[test]
    fn test_start_index() {
        let result = QueryResult {
            page: Vec::new(),
            matched_count: 0,
            total_count: 0,
            total_pages: 1,
            citation_sum: 0,
            page_index: 3,
            page_size: 5,
        };
        assert_eq!(result.start_index(), 10);

        let result = QueryResult {
            page_index: 0,
            ..result
        };
        assert_eq!(result.start_index(), 0);
        assert!(!result.has_previous());
    }

    #[test]
    fn test_sort_key_serde_names() {
        assert_eq!(
            serde_json::to_string(&SortKey::CitationCount).unwrap(),
            "\"citationCount\""
        );
        assert_eq!(
            serde_json::to_string(&SortDirection::Ascending).unwrap(),
            "\"ascending\""
        );
    }
}
