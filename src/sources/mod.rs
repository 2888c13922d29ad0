//! Data sources supplying citer records.
//!
//! This module defines the [`CiterSource`] trait that every backend implements.
//! The query engine only ever sees a slice of [`Citer`] records, so swapping
//! the bundled fixture for a real backend does not touch the engine.
//!
//! - [`FixtureSource`]: the built-in sample of 15 citers
//! - [`JsonFileSource`]: citers loaded from a JSON array on disk
//! - [`MockSource`]: configurable source for tests
//!
//! # Implementing a New Source
//!
//! 1. Create a struct that implements `CiterSource`
//! 2. Implement `id`, `name` and `list_citers`
//! 3. Override `get_citer` if the backend can look up a single record directly

mod fixture;
mod json;
pub mod mock;

pub use fixture::{sample_citers, FixtureSource};
pub use json::JsonFileSource;
pub use mock::MockSource;

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::models::Citer;

/// Interface for anything that can list citers
#[async_trait]
pub trait CiterSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g., "fixture", "json")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// All citers, in the source's natural order
    async fn list_citers(&self) -> Result<Vec<Citer>, SourceError>;

    /// A single citer by ID
    async fn get_citer(&self, id: &str) -> Result<Citer, SourceError> {
        self.list_citers()
            .await?
            .into_iter()
            .find(|citer| citer.id == id)
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }
}

/// Pick the source described by the configuration
///
/// A configured `data.citers_file` selects [`JsonFileSource`]; otherwise the
/// bundled fixture is used.
pub fn source_from_config(config: &Config) -> Arc<dyn CiterSource> {
    match &config.data.citers_file {
        Some(path) => Arc::new(JsonFileSource::new(PathBuf::from(path))),
        None => Arc::new(FixtureSource::new()),
    }
}

/// Errors that can occur when loading citers
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Citer not found
    #[error("Citer not found: {0}")]
    NotFound(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
