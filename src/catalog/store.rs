use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::catalog::loader::{self, CorpusData, CORPUS_VERSION};
use crate::core::case::{Case, CaseSummary};
use crate::core::keywords::KeywordSetError;
use crate::core::types::{CaseId, Difficulty};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read corpus: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse corpus: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Unknown case: {0}")]
    CaseNotFound(CaseId),

    #[error("Duplicate case id: {0}")]
    DuplicateCaseId(CaseId),

    #[error("Case '{case_id}' has no clues")]
    NoClues { case_id: CaseId },

    #[error("Case '{case_id}': clue at position {position} has id {found}, expected {}", .position + 1)]
    ClueOrder {
        case_id: CaseId,
        position: usize,
        found: u32,
    },

    #[error("Case '{case_id}': {source}")]
    Rubric {
        case_id: CaseId,
        source: KeywordSetError,
    },
}

/// Filter for case listings; empty filter matches everything
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    /// Only cases at exactly this difficulty
    pub difficulty: Option<Difficulty>,

    /// Only cases in this category (case-insensitive)
    pub category: Option<String>,
}

impl CaseFilter {
    fn matches(&self, case: &Case) -> bool {
        if self.difficulty.is_some_and(|d| d != case.difficulty) {
            return false;
        }
        if let Some(category) = &self.category {
            if !case.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        true
    }
}

/// The read-only case index with id lookups
#[derive(Debug)]
pub struct CaseCatalog {
    /// All cases, in corpus order
    pub cases: Vec<Case>,

    /// Index: case ID -> index in cases vec
    id_to_index: HashMap<CaseId, usize>,
}

impl CaseCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            cases: Vec::new(),
            id_to_index: HashMap::new(),
        }
    }

    /// Load the embedded default corpus
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the embedded corpus fails validation;
    /// `build.rs` checks its structure, so this only fires on a corrupted
    /// build.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Embedded at compile time; validated by build.rs
        const EMBEDDED_CORPUS: &str = include_str!("../../corpus/cases.json");
        Self::from_json(EMBEDDED_CORPUS)
    }

    /// Load a corpus from a JSON file
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or fails
    /// validation.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a corpus from a JSON string
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the document is malformed or any case
    /// fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cases = loader::parse_corpus(json)?;
        Self::from_cases(cases)
    }

    /// Build a catalog from already-validated cases.
    ///
    /// Keyword sets must be populated (loading paths do this); the only check
    /// here is id uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateCaseId`] if two cases share an id.
    pub fn from_cases(cases: Vec<Case>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for case in cases {
            if catalog.id_to_index.contains_key(&case.id) {
                return Err(CatalogError::DuplicateCaseId(case.id));
            }
            catalog.id_to_index.insert(case.id.clone(), catalog.cases.len());
            catalog.cases.push(case);
        }
        Ok(catalog)
    }

    /// Get a case by ID
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CaseNotFound`] for an unknown id.
    pub fn get(&self, id: &CaseId) -> Result<&Case, CatalogError> {
        self.id_to_index
            .get(id)
            .map(|&idx| &self.cases[idx])
            .ok_or_else(|| CatalogError::CaseNotFound(id.clone()))
    }

    /// List solution-free summaries of the cases matching `filter`, in
    /// corpus order
    #[must_use]
    pub fn list(&self, filter: &CaseFilter) -> Vec<CaseSummary> {
        self.cases
            .iter()
            .filter(|case| filter.matches(case))
            .map(Case::summary)
            .collect()
    }

    /// Export the corpus to JSON
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ParseError`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CorpusData {
            version: CORPUS_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            cases: self.cases.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of cases in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Check if the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl Default for CaseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::case::Solution;
    use crate::core::clue::Clue;
    use crate::core::types::ClueKind;

    fn tiny_case(id: &str, difficulty: Difficulty, category: &str) -> Case {
        let solution = Solution::new("d", vec!["keyword".to_string()], "r").unwrap();
        Case::new(id, "title", difficulty, category, solution)
            .with_clues(vec![Clue::new(1, ClueKind::Logs, "content")])
    }

    #[test]
    fn test_load_embedded_corpus() {
        let catalog = CaseCatalog::load_embedded().unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_embedded_cases_are_ready_to_grade() {
        let catalog = CaseCatalog::load_embedded().unwrap();
        for case in &catalog.cases {
            assert!(
                !case.solution.keyword_set.is_empty(),
                "case {} loaded without a rubric",
                case.id
            );
        }
    }

    #[test]
    fn test_catalog_get_by_id() {
        let catalog = CaseCatalog::load_embedded().unwrap();

        let case = catalog.get(&CaseId::new("connection-pool-exhaustion")).unwrap();
        assert_eq!(case.difficulty, Difficulty::Mid);
        assert!(case.clue_count() >= 2);
        assert!(case.clue(1).is_some());
    }

    #[test]
    fn test_catalog_get_nonexistent() {
        let catalog = CaseCatalog::load_embedded().unwrap();
        let result = catalog.get(&CaseId::new("nonexistent-case"));
        assert!(matches!(result, Err(CatalogError::CaseNotFound(_))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let cases = vec![
            tiny_case("dup", Difficulty::Junior, "database"),
            tiny_case("dup", Difficulty::Senior, "networking"),
        ];
        assert!(matches!(
            CaseCatalog::from_cases(cases),
            Err(CatalogError::DuplicateCaseId(_))
        ));
    }

    #[test]
    fn test_list_unfiltered_preserves_order() {
        let cases = vec![
            tiny_case("b-case", Difficulty::Junior, "database"),
            tiny_case("a-case", Difficulty::Senior, "networking"),
        ];
        let catalog = CaseCatalog::from_cases(cases).unwrap();

        let ids: Vec<String> = catalog
            .list(&CaseFilter::default())
            .into_iter()
            .map(|s| s.id.0)
            .collect();
        assert_eq!(ids, vec!["b-case", "a-case"]);
    }

    #[test]
    fn test_list_filters_difficulty_and_category() {
        let cases = vec![
            tiny_case("one", Difficulty::Junior, "database"),
            tiny_case("two", Difficulty::Senior, "database"),
            tiny_case("three", Difficulty::Senior, "networking"),
        ];
        let catalog = CaseCatalog::from_cases(cases).unwrap();

        let filter = CaseFilter {
            difficulty: Some(Difficulty::Senior),
            ..Default::default()
        };
        assert_eq!(catalog.list(&filter).len(), 2);

        let filter = CaseFilter {
            difficulty: Some(Difficulty::Senior),
            category: Some("Networking".to_string()),
        };
        let summaries = catalog.list(&filter);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, CaseId::new("three"));
    }

    #[test]
    fn test_list_summaries_expose_no_solution() {
        let catalog = CaseCatalog::load_embedded().unwrap();
        let json = serde_json::to_string(&catalog.list(&CaseFilter::default())).unwrap();
        assert!(!json.contains("keywords"));
        assert!(!json.contains("diagnosis"));
    }

    #[test]
    fn test_catalog_to_json_roundtrip() {
        let catalog = CaseCatalog::load_embedded().unwrap();
        let json = catalog.to_json().unwrap();

        assert!(json.contains("\"version\""));
        assert!(json.contains("\"cases\""));
        assert!(json.contains("connection-pool-exhaustion"));

        // An exported corpus loads back with rubrics rebuilt
        let back = CaseCatalog::from_json(&json).unwrap();
        assert_eq!(back.len(), catalog.len());
        assert!(!back.cases[0].solution.keyword_set.is_empty());
    }
}
