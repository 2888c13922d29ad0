//! Terminal rendering of the citers page.
//!
//! Pages render to a `String` so the CLI decides where output goes; status
//! helpers print colored lines to stderr.

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use owo_colors::OwoColorize;

use crate::models::Citer;
use crate::page::{PageView, Redirect, NO_RESULTS};
use crate::utils::{citer_table_columns, format_number, truncate_with_ellipsis};

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
}

/// Status icons for different outcomes.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
    }
}

/// Print a styled status message to stderr.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => eprintln!("{} {}", icon.green().bold(), msg),
        Status::Error => eprintln!("{} {}", icon.red().bold(), msg),
        Status::Warning => eprintln!("{} {}", icon.yellow().bold(), msg),
        Status::Info => eprintln!("{} {}", icon.cyan().bold(), msg),
    }
}

/// Print the redirect issued to an unauthenticated request.
pub fn print_redirect(redirect: &Redirect) {
    print_status(
        Status::Warning,
        &format!("Not signed in, redirecting to {}", redirect.destination),
    );
}

/// Render a page as a table sized to `width` terminal columns.
pub fn render_table(view: &PageView, width: usize) -> String {
    let (name_width, affiliation_width) = citer_table_columns(width);

    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Disabled);

    let mut header: Vec<Cell> = view
        .columns
        .iter()
        .map(|column| Cell::new(column.title()).add_attribute(Attribute::Bold))
        .collect();
    header.push(Cell::new("Details").add_attribute(Attribute::Bold));
    table.set_header(header);

    if view.no_results {
        table.add_row(vec![Cell::new(NO_RESULTS).set_alignment(CellAlignment::Center)]);
    }

    for row in &view.rows {
        table.add_row(vec![
            Cell::new(truncate_with_ellipsis(&row.name, name_width)).add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&row.affiliation, affiliation_width)),
            Cell::new(format_number(row.citation_count)).set_alignment(CellAlignment::Right),
            Cell::new(&row.detail_path),
        ]);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}    Logged in as: {}\n",
        view.title, view.logged_in_as
    ));
    if !view.search_text.is_empty() {
        out.push_str(&format!("Search: \"{}\"\n", view.search_text));
    }
    out.push_str(&table.to_string());
    out.push('\n');
    out.push_str(&footer(view));
    out
}

/// Render a page as plain text, one citer per line.
pub fn render_plain(view: &PageView) -> String {
    let mut out = format!("{}\nLogged in as: {}\n\n", view.title, view.logged_in_as);

    if view.no_results {
        out.push_str(NO_RESULTS);
        out.push('\n');
    }

    for row in &view.rows {
        out.push_str(&format!(
            "{} - {} ({} citations)\n  Details: {}\n",
            row.name, row.affiliation, row.citation_count, row.detail_path
        ));
    }

    out.push_str(&footer(view));
    out
}

/// Render a page as pretty-printed JSON.
pub fn render_json(view: &PageView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}

/// Render a single citer for the detail view.
pub fn render_citer(citer: &Citer) -> String {
    format!(
        "{}\n  Affiliation:     {}\n  Total Citations: {}\n  ID:              {}\n",
        citer.name,
        citer.affiliation,
        format_number(citer.citation_count),
        citer.id
    )
}

fn footer(view: &PageView) -> String {
    let mut out = String::new();

    if let Some(caption) = &view.caption {
        out.push_str(&format!(
            "{}    {}\n",
            caption.entries_text(),
            caption.citations_text()
        ));
    }

    if let Some(pagination) = &view.pagination {
        let options = pagination
            .page_size_options
            .iter()
            .map(|size| {
                if *size == pagination.page_size {
                    format!("[{}]", size)
                } else {
                    size.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        out.push_str(&format!(
            "{}    Rows: {}    {} {}\n",
            pagination.page_text(),
            options,
            if pagination.previous_disabled { "(prev)" } else { "<prev" },
            if pagination.next_disabled { "(next)" } else { "next>" },
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::User;
    use crate::models::QueryState;
    use crate::query::query;
    use crate::sources::sample_citers;

    fn view(state: QueryState) -> PageView {
        let result = query(&sample_citers(), &state);
        PageView::build(&User::new("123", "John Researcher"), &state, &result)
    }

    #[test]
    fn test_render_table() {
        let out = render_table(&view(QueryState::default()), 120);
        assert!(out.contains("Logged in as: John Researcher"));
        assert!(out.contains("Total Citations ↓"));
        assert!(out.contains("Dr. Sarah Johnson"));
        assert!(out.contains("/citers/1"));
        assert!(out.contains("Showing 10 of 15 entries"));
        assert!(out.contains("Total Citations: 2468"));
        assert!(out.contains("Page 1 of 2"));
        assert!(out.contains("Rows: 5 [10] 15 20"));
        assert!(out.contains("(prev) next>"));
    }

    #[test]
    fn test_render_table_no_results() {
        let out = render_table(&view(QueryState::new().search_text("zzz")), 120);
        assert!(out.contains(NO_RESULTS));
        assert!(out.contains("Search: \"zzz\""));
        assert!(!out.contains("Showing"));
        assert!(!out.contains("Page "));
    }

    #[test]
    fn test_render_plain() {
        let out = render_plain(&view(QueryState::new().search_text("mit")));
        assert!(out.contains("Prof. Michael Chen - MIT (287 citations)"));
        assert!(out.contains("Page 1 of 1"));
        assert!(out.contains("(prev) (next)"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&view(QueryState::default())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rows"].as_array().unwrap().len(), 10);
        assert_eq!(value["caption"]["total_citations"], 2468);
        assert_eq!(value["columns"][2]["key"], "citationCount");
    }

    #[test]
    fn test_render_citer() {
        let out = render_citer(&sample_citers()[0]);
        assert!(out.starts_with("Dr. Sarah Johnson\n"));
        assert!(out.contains("Stanford University"));
    }
}
