use serde::{Deserialize, Serialize};

use crate::core::clue::Clue;
use crate::core::keywords::{KeywordSet, KeywordSetError};
use crate::core::types::{CaseId, Difficulty};

/// The answer to a case: the written diagnosis, the rubric the matcher grades
/// against, and what fixing it looked like.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Prose root-cause statement shown after an attempt is finalized
    pub diagnosis: String,

    /// Raw rubric entries as authored in the corpus
    pub keywords: Vec<String>,

    /// What the responding team actually did about it
    pub remediation: String,

    // === Pre-computed for matching (populated on load) ===
    /// Normalized, deduplicated rubric
    #[serde(skip)]
    pub keyword_set: KeywordSet,
}

impl Solution {
    /// Build a solution with its keyword set computed eagerly.
    ///
    /// # Errors
    ///
    /// Fails if no keyword survives normalization.
    pub fn new(
        diagnosis: impl Into<String>,
        keywords: Vec<String>,
        remediation: impl Into<String>,
    ) -> Result<Self, KeywordSetError> {
        let mut solution = Self {
            diagnosis: diagnosis.into(),
            keywords,
            remediation: remediation.into(),
            keyword_set: KeywordSet::default(),
        };
        solution.rebuild_keywords()?;
        Ok(solution)
    }

    /// Rebuild the normalized keyword set after deserialization or edits.
    ///
    /// # Errors
    ///
    /// Fails if no keyword survives normalization; the case cannot be graded
    /// and must be rejected at load.
    pub fn rebuild_keywords(&mut self) -> Result<(), KeywordSetError> {
        self.keyword_set = KeywordSet::build(&self.keywords)?;
        Ok(())
    }
}

/// A complete drill case: ordered clues plus the solution they point at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    /// Unique identifier within the corpus
    pub id: CaseId,

    /// Human-readable incident title
    pub title: String,

    /// Difficulty grade
    pub difficulty: Difficulty,

    /// Free-form grouping label (e.g. `database`, `networking`)
    pub category: String,

    /// Evidence in reveal order; ids are `1..=N` with no gaps
    pub clues: Vec<Clue>,

    /// The answer and its grading rubric
    pub solution: Solution,
}

impl Case {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        difficulty: Difficulty,
        category: impl Into<String>,
        solution: Solution,
    ) -> Self {
        Self {
            id: CaseId::new(id),
            title: title.into(),
            difficulty,
            category: category.into(),
            clues: Vec::new(),
            solution,
        }
    }

    #[must_use]
    pub fn with_clues(mut self, clues: Vec<Clue>) -> Self {
        self.clues = clues;
        self
    }

    /// Rebuild derived state after deserialization
    ///
    /// # Errors
    ///
    /// Fails if the rubric is empty after normalization.
    pub fn rebuild_keywords(&mut self) -> Result<(), KeywordSetError> {
        self.solution.rebuild_keywords()
    }

    /// Number of clues in this case
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.clues.len()
    }

    /// Look up a clue by its 1-based id.
    ///
    /// Ids are dense, so this is an index lookup; the filter guards
    /// hand-built cases that never went through corpus validation.
    #[must_use]
    pub fn clue(&self, id: u32) -> Option<&Clue> {
        if id == 0 {
            return None;
        }
        self.clues.get(id as usize - 1).filter(|c| c.id == id)
    }

    /// Solution-free view for listings
    #[must_use]
    pub fn summary(&self) -> CaseSummary {
        CaseSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            difficulty: self.difficulty,
            category: self.category.clone(),
            clue_count: self.clue_count(),
        }
    }
}

/// What browsing surfaces may show: everything except clue content and the
/// solution, so a listing can never spoil a drill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub id: CaseId,
    pub title: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub clue_count: usize,
}
