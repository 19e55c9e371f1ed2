use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::store::CatalogError;
use crate::core::case::Case;

/// Corpus format version for compatibility checking
pub const CORPUS_VERSION: &str = "1.0";

/// Serializable corpus format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusData {
    pub version: String,
    pub created_at: String,
    pub cases: Vec<Case>,
}

/// Parse and validate a corpus document.
///
/// Every case comes back with its keyword set rebuilt and its clue ordering
/// checked, so downstream code can rely on `clues[i].id == i + 1`.
///
/// # Errors
///
/// Returns a [`CatalogError`] for malformed JSON, a case without clues, a
/// clue id sequence with gaps or reordering, or a rubric that is empty after
/// normalization.
pub fn parse_corpus(json: &str) -> Result<Vec<Case>, CatalogError> {
    let data: CorpusData = serde_json::from_str(json)?;

    // Version check (warn but don't fail)
    if data.version != CORPUS_VERSION {
        warn!(
            expected = CORPUS_VERSION,
            found = %data.version,
            "corpus version mismatch"
        );
    }

    let mut cases = data.cases;
    for case in &mut cases {
        validate_case(case)?;
    }

    Ok(cases)
}

fn validate_case(case: &mut Case) -> Result<(), CatalogError> {
    if case.clues.is_empty() {
        return Err(CatalogError::NoClues {
            case_id: case.id.clone(),
        });
    }

    // Clue ids must run 1..=N in vec order; reveal progression indexes on it
    for (position, clue) in case.clues.iter().enumerate() {
        let expected = (position + 1) as u32;
        if clue.id != expected {
            return Err(CatalogError::ClueOrder {
                case_id: case.id.clone(),
                position,
                found: clue.id,
            });
        }
    }

    case.rebuild_keywords()
        .map_err(|source| CatalogError::Rubric {
            case_id: case.id.clone(),
            source,
        })?;

    Ok(())
}
