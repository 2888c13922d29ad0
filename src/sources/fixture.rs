//! Built-in sample citers.

use async_trait::async_trait;

use crate::models::Citer;
use crate::sources::{CiterSource, SourceError};

const SAMPLE: [(&str, &str, &str, u64); 15] = [
    ("1", "Dr. Sarah Johnson", "Stanford University", 342),
    ("2", "Prof. Michael Chen", "MIT", 287),
    ("3", "Dr. Emily Rodriguez", "University of California, Berkeley", 215),
    ("4", "Prof. David Kim", "Harvard University", 198),
    ("5", "Dr. Lisa Wang", "University of Oxford", 176),
    ("6", "Prof. James Wilson", "ETH Zurich", 163),
    ("7", "Dr. Sophia Patel", "University of Cambridge", 154),
    ("8", "Prof. Robert Garcia", "University of Tokyo", 142),
    ("9", "Dr. Olivia Martinez", "National University of Singapore", 137),
    ("10", "Prof. Thomas Lee", "University of Toronto", 129),
    ("11", "Dr. Emma Brown", "Imperial College London", 118),
    ("12", "Prof. Daniel Smith", "Tsinghua University", 112),
    ("13", "Dr. Ava Williams", "University of Michigan", 105),
    ("14", "Prof. Alexander Davis", "Technical University of Munich", 98),
    ("15", "Dr. Natalie Taylor", "University of Edinburgh", 92),
];

/// The 15 sample citers, in fixture order
pub fn sample_citers() -> Vec<Citer> {
    SAMPLE
        .iter()
        .map(|(id, name, affiliation, citations)| Citer::new(*id, *name, *affiliation, *citations))
        .collect()
}

/// Source serving the static sample data
#[derive(Debug, Clone)]
pub struct FixtureSource {
    citers: Vec<Citer>,
}

impl FixtureSource {
    /// Create a fixture source with the sample citers
    pub fn new() -> Self {
        Self {
            citers: sample_citers(),
        }
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CiterSource for FixtureSource {
    fn id(&self) -> &str {
        "fixture"
    }

    fn name(&self) -> &str {
        "Sample Citers"
    }

    async fn list_citers(&self) -> Result<Vec<Citer>, SourceError> {
        Ok(self.citers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_has_unique_ids() {
        let citers = sample_citers();
        assert_eq!(citers.len(), 15);
        let ids: HashSet<_> = citers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 15);
    }

    #[test]
    fn test_sample_max_citations() {
        let max = sample_citers().iter().map(|c| c.citation_count).max();
        assert_eq!(max, Some(342));
    }

    #[tokio::test]
    async fn test_fixture_source_lists_sample() {
        let source = FixtureSource::new();
        let citers = source.list_citers().await.unwrap();
        assert_eq!(citers, sample_citers());
    }
}
