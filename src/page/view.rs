//! View model for the citers page.

use serde::Serialize;

use crate::auth::User;
use crate::models::{Citer, QueryResult, QueryState, SortKey, PAGE_SIZE_OPTIONS};

/// Page heading
pub const PAGE_TITLE: &str = "Shortlist Potential Citers";

/// Message shown in place of rows when the search matched nothing
pub const NO_RESULTS: &str = "No results found.";

/// Everything needed to draw the citers page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub title: String,
    pub logged_in_as: String,
    pub search_text: String,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<RowView>,

    /// Set when the search matched nothing; render [`NO_RESULTS`] instead of rows
    pub no_results: bool,

    /// Present only when something matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<Caption>,

    /// Present only when something matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationView>,
}

/// A sortable column header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnHeader {
    pub key: SortKey,
    pub label: String,

    /// Arrow when this is the active sort column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator: Option<String>,
}

impl ColumnHeader {
    /// Label with the sort arrow appended, if any
    pub fn title(&self) -> String {
        match &self.indicator {
            Some(arrow) => format!("{} {}", self.label, arrow),
            None => self.label.clone(),
        }
    }
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: String,
    pub name: String,
    pub affiliation: String,
    pub citation_count: u64,
    pub detail_path: String,
}

impl From<&Citer> for RowView {
    fn from(citer: &Citer) -> Self {
        Self {
            id: citer.id.clone(),
            name: citer.name.clone(),
            affiliation: citer.affiliation.clone(),
            citation_count: citer.citation_count,
            detail_path: citer.detail_path(),
        }
    }
}

/// Summary line under the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caption {
    pub showing: usize,
    pub matched: usize,
    pub total_citations: u64,
}

impl Caption {
    pub fn entries_text(&self) -> String {
        format!("Showing {} of {} entries", self.showing, self.matched)
    }

    pub fn citations_text(&self) -> String {
        format!("Total Citations: {}", self.total_citations)
    }
}

/// Pagination controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    pub page_index: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl PaginationView {
    pub fn page_text(&self) -> String {
        format!("Page {} of {}", self.page_index, self.total_pages)
    }
}

impl PageView {
    /// Build the view for `user` from a computed query result
    pub fn build(user: &User, state: &QueryState, result: &QueryResult) -> Self {
        let columns = SortKey::ALL
            .iter()
            .map(|key| ColumnHeader {
                key: *key,
                label: key.label().to_string(),
                indicator: (*key == state.sort_key)
                    .then(|| state.sort_direction.indicator().to_string()),
            })
            .collect();

        let no_results = result.is_empty();

        let caption = (!no_results).then(|| Caption {
            showing: result.page.len(),
            matched: result.matched_count,
            total_citations: result.citation_sum,
        });

        let pagination = (!no_results).then(|| PaginationView {
            page_index: result.page_index,
            total_pages: result.total_pages,
            page_size: result.page_size,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            previous_disabled: !result.has_previous(),
            next_disabled: !result.has_next(),
        });

        Self {
            title: PAGE_TITLE.to_string(),
            logged_in_as: user.name.clone(),
            search_text: state.search_text.clone(),
            columns,
            rows: result.page.iter().map(RowView::from).collect(),
            no_results,
            caption,
            pagination,
        }
    }
}
