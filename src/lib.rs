//! # MeritPath
//!
//! The authenticated "Citers" page: researchers who cite your work, with
//! search, sort and pagination.
//!
//! ## Architecture
//!
//! - [`models`]: Core data structures (Citer, QueryState, QueryResult)
//! - [`query`]: The table query engine (filter, stable sort, paginate)
//! - [`sources`]: Data sources behind the [`CiterSource`] trait
//! - [`auth`]: Cookie-based per-request auth gate
//! - [`page`]: The host page tying auth, data and the engine together
//! - [`ui`]: Terminal rendering of a page
//! - [`config`]: Configuration management
//! - [`utils`]: Display helpers

pub mod auth;
pub mod config;
pub mod models;
pub mod page;
pub mod query;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use models::{Citer, QueryResult, QueryState};
pub use sources::CiterSource;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
