//! Core data models for citers and table queries.

mod citer;
mod query;

pub use citer::Citer;
pub use query::{
    QueryResult, QueryState, SortDirection, SortKey, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
