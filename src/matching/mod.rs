//! Diagnosis matching and attempt scoring.
//!
//! This module provides the grading half of the engine:
//!
//! - [`DiagnosisMatcher`]: Grades free-text diagnoses against a case rubric
//! - [`MatchReport`]: What was found, what was missed, and the resulting band
//! - [`AttemptScorer`]: Combines a report with session usage into a score
//!
//! ## Matching Algorithm
//!
//! Grading is deliberately simple and inspectable:
//!
//! 1. **Normalization**: Submission and rubric share one normal form
//!    (lowercase, punctuation to spaces, interior hyphens kept)
//! 2. **Bounded search**: Each keyword must occur on token boundaries, so
//!    `cache` never matches inside `cached`
//! 3. **Ratio banding**: `hits / rubric size` lands in `NoMatch`, `Partial`,
//!    or `Strong` via configurable thresholds
//!
//! ## Scoring
//!
//! The final score starts from a base per match class and pays for the help
//! taken along the way:
//!
//! - **Base**: strong and partial bases from the [`ScoringPolicy`]; no match
//!   is always worth zero
//! - **Clue penalty**: per reveal after the free first clue
//! - **Hint penalty**: per hint taken
//! - **Floor**: scores never go below it; elapsed time is reported, not scored
//!
//! ## Example
//!
//! ```rust,no_run
//! use incident_drill::{AttemptScorer, CaseCatalog, ClueRevealController, DiagnosisMatcher};
//! use incident_drill::core::types::CaseId;
//!
//! let catalog = CaseCatalog::load_embedded().unwrap();
//! let controller = ClueRevealController::new(&catalog);
//! let mut session = controller.start(&CaseId::new("connection-pool-exhaustion")).unwrap();
//!
//! let case = catalog.get(session.case_id()).unwrap();
//! let report = DiagnosisMatcher::new().evaluate(case, "an unreleased connection drained the pool");
//! let result = AttemptScorer::new().finalize(&mut session, &report).unwrap();
//!
//! println!("{}: {} ({:.0}%)", result.case_id, result.score, result.match_ratio * 100.0);
//! ```
//!
//! [`DiagnosisMatcher`]: matcher::DiagnosisMatcher
//! [`MatchReport`]: matcher::MatchReport
//! [`AttemptScorer`]: scoring::AttemptScorer
//! [`ScoringPolicy`]: scoring::ScoringPolicy

pub mod matcher;
pub mod scoring;
