//! Text commands driving an open [`CitersTable`].

use std::str::FromStr;

use super::CitersTable;
use crate::models::{SortKey, PAGE_SIZE_OPTIONS};

/// One user interaction with the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    /// Replace the search text (kept verbatim, spaces included)
    Search(String),
    /// Clear the search text
    Clear,
    /// Sort by a column, toggling direction if it is already active
    Sort(SortKey),
    /// Change rows per page
    PageSize(usize),
    Next,
    Prev,
    Show,
    Help,
    Quit,
}

/// Errors parsing a [`TableCommand`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Unknown column: {0} (expected name, affiliation or citations)")]
    UnknownColumn(String),

    #[error("Invalid page size: {0} (expected one of 5, 10, 15, 20)")]
    InvalidPageSize(String),

    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),
}

/// Help text listing the available commands
pub const HELP: &str = "\
search <text>   filter by name or affiliation
clear           clear the search
sort <column>   sort by name, affiliation or citations (repeat to toggle)
size <n>        rows per page (5, 10, 15, 20)
next | prev     change page
show            redraw the table
quit            leave";

impl FromStr for TableCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(' ') {
            Some((word, rest)) => (word, Some(rest)),
            None => (line.trim_end(), None),
        };

        match word.to_lowercase().as_str() {
            "search" | "s" | "/" => rest
                .map(|text| TableCommand::Search(text.to_string()))
                .ok_or(CommandError::MissingArgument("search")),
            "clear" => Ok(TableCommand::Clear),
            "sort" | "o" => {
                let column = rest
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .ok_or(CommandError::MissingArgument("sort"))?;
                parse_column(column).map(TableCommand::Sort)
            }
            "size" => {
                let size = rest
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or(CommandError::MissingArgument("size"))?;
                size.parse::<usize>()
                    .ok()
                    .filter(|n| PAGE_SIZE_OPTIONS.contains(n))
                    .map(TableCommand::PageSize)
                    .ok_or_else(|| CommandError::InvalidPageSize(size.to_string()))
            }
            "next" | "n" => Ok(TableCommand::Next),
            "prev" | "p" => Ok(TableCommand::Prev),
            "show" | "" => Ok(TableCommand::Show),
            "help" | "?" => Ok(TableCommand::Help),
            "quit" | "q" | "exit" => Ok(TableCommand::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_column(column: &str) -> Result<SortKey, CommandError> {
    match column.to_lowercase().as_str() {
        "name" => Ok(SortKey::Name),
        "affiliation" | "university" => Ok(SortKey::Affiliation),
        "citations" | "citationcount" | "total" => Ok(SortKey::CitationCount),
        _ => Err(CommandError::UnknownColumn(column.to_string())),
    }
}

impl TableCommand {
    /// Apply a state-changing command; returns whether the table changed
    pub fn apply(&self, table: &mut CitersTable) -> bool {
        match self {
            TableCommand::Search(text) => table.set_search_text(text.as_str()),
            TableCommand::Clear => table.set_search_text(""),
            TableCommand::Sort(key) => table.set_sort(*key),
            TableCommand::PageSize(size) => table.set_page_size(*size),
            TableCommand::Next => table.next_page(),
            TableCommand::Prev => table.prev_page(),
            TableCommand::Show | TableCommand::Help | TableCommand::Quit => return false,
        }
        true
    }
}
