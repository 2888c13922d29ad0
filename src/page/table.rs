//! Stateful table view owning a query state.

use crate::models::{Citer, QueryResult, QueryState, SortKey};
use crate::query::query;

/// One open citers table: the records, the current [`QueryState`] and the
/// result it produces
///
/// Every transition recomputes the result and keeps the page index within
/// `[1, total_pages]`.
#[derive(Debug, Clone)]
pub struct CitersTable {
    records: Vec<Citer>,
    state: QueryState,
    result: QueryResult,
}

impl CitersTable {
    /// Open a table over `records` starting from `state`
    pub fn new(records: Vec<Citer>, state: QueryState) -> Self {
        let result = query(&records, &state);
        let mut table = Self {
            records,
            state,
            result,
        };
        table.refresh();
        table
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn result(&self) -> &QueryResult {
        &self.result
    }

    pub fn records(&self) -> &[Citer] {
        &self.records
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.set_search_text(text);
        self.refresh();
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.state.set_sort(key);
        self.refresh();
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.state.set_page_size(size);
        self.refresh();
    }

    pub fn next_page(&mut self) {
        self.state.next_page(self.result.total_pages);
        self.refresh();
    }

    pub fn prev_page(&mut self) {
        self.state.prev_page();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.result = query(&self.records, &self.state);

        let before = self.state.page_index;
        self.state.clamp_page(self.result.total_pages);
        if self.state.page_index != before {
            tracing::debug!(
                from = before,
                to = self.state.page_index,
                "Clamped page index"
            );
            self.result = query(&self.records, &self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortDirection;
    use crate::sources::sample_citers;

    #[test]
    fn test_open_clamps_out_of_range_page() {
        let table = CitersTable::new(sample_citers(), QueryState::new().page_size(5).page_index(4));
        assert_eq!(table.state().page_index, 3);
        assert_eq!(table.result().page.len(), 5);
    }

    #[test]
    fn test_paging_through_table() {
        let mut table = CitersTable::new(sample_citers(), QueryState::new().page_size(5));
        table.next_page();
        table.next_page();
        table.next_page();
        assert_eq!(table.state().page_index, 3);
        assert_eq!(table.result().page[0].citation_count, 118);

        table.prev_page();
        assert_eq!(table.state().page_index, 2);
    }

    #[test]
    fn test_search_resets_to_first_page() {
        let mut table = CitersTable::new(sample_citers(), QueryState::new().page_size(5));
        table.next_page();
        table.set_search_text("oxford");

        assert_eq!(table.state().page_index, 1);
        assert_eq!(table.result().matched_count, 1);
        assert_eq!(table.result().total_pages, 1);
    }

    #[test]
    fn test_sort_toggle_keeps_page() {
        let mut table = CitersTable::new(sample_citers(), QueryState::new().page_size(5));
        table.next_page();
        table.set_sort(SortKey::Name);
        assert_eq!(table.state().sort_direction, SortDirection::Ascending);
        assert_eq!(table.state().page_index, 2);

        table.set_sort(SortKey::Name);
        assert_eq!(table.state().sort_direction, SortDirection::Descending);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut table = CitersTable::new(sample_citers(), QueryState::new().page_size(5));
        table.next_page();
        table.set_page_size(20);
        assert_eq!(table.state().page_index, 1);
        assert_eq!(table.result().page.len(), 15);
        assert_eq!(table.result().total_pages, 1);
    }
}
