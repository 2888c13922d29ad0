//! Citers loaded from a JSON file.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::models::Citer;
use crate::sources::{CiterSource, SourceError};

/// Source reading a JSON array of citers from disk on every request
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl CiterSource for JsonFileSource {
    fn id(&self) -> &str {
        "json"
    }

    fn name(&self) -> &str {
        "JSON File"
    }

    async fn list_citers(&self) -> Result<Vec<Citer>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let citers: Vec<Citer> = serde_json::from_str(&content)?;

        let mut seen = HashSet::new();
        if let Some(dup) = citers.iter().find(|c| !seen.insert(c.id.as_str())) {
            return Err(SourceError::Parse(format!(
                "duplicate citer id '{}' in {}",
                dup.id,
                self.path.display()
            )));
        }

        tracing::debug!(
            "Loaded {} citers from {}",
            citers.len(),
            self.path.display()
        );
        Ok(citers)
    }
}
