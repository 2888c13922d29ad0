//! Citer model representing a researcher who cites the user's work.

use serde::{Deserialize, Serialize};

/// A researcher entity shown in the citers table
///
/// Records are owned by a [`CiterSource`](crate::sources::CiterSource) and
/// are never mutated by the query engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citer {
    /// Unique, stable identifier (also the detail page key)
    pub id: String,

    /// Display name, including any title ("Dr.", "Prof.")
    pub name: String,

    /// Institution the researcher is affiliated with
    #[serde(alias = "university")]
    pub affiliation: String,

    /// Total number of citations
    #[serde(alias = "totalCitations")]
    pub citation_count: u64,
}

impl Citer {
    /// Create a new citer
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        affiliation: impl Into<String>,
        citation_count: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            affiliation: affiliation.into(),
            citation_count,
        }
    }

    /// Path of the detail view for this citer
    pub fn detail_path(&self) -> String {
        format!("/citers/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_path() {
        let citer = Citer::new("7", "Dr. Sophia Patel", "University of Cambridge", 154);
        assert_eq!(citer.detail_path(), "/citers/7");
    }

    #[test]
    fn test_serialize_camel_case() {
        let citer = Citer::new("1", "Dr. Sarah Johnson", "Stanford University", 342);
        let json = serde_json::to_value(&citer).unwrap();
        assert_eq!(json["citationCount"], 342);
        assert_eq!(json["affiliation"], "Stanford University");
    }

    #[test]
    fn test_deserialize_legacy_field_names() {
        let json = r#"{"id":"2","name":"Prof. Michael Chen","university":"MIT","totalCitations":287}"#;
        let citer: Citer = serde_json::from_str(json).unwrap();
        assert_eq!(citer.affiliation, "MIT");
        assert_eq!(citer.citation_count, 287);
    }
}
