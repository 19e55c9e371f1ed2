//! # incident-drill
//!
//! A library for running incident response drills: progressive clue reveals
//! and free-text diagnosis grading against a corpus of past incidents.
//!
//! A drill works like a case file review. The participant starts from the
//! first, broadest clue (the symptom as it appeared), asks for further clues
//! and hints as needed, and eventually writes down a root-cause diagnosis in
//! their own words. The engine grades that text against the case's rubric
//! keywords and scores the attempt by how much help it took to get there.
//!
//! ## Features
//!
//! - **Ordered reveals**: Clues come out one at a time, most significant
//!   last; nothing can be skipped or un-revealed
//! - **Priced assistance**: The first clue is free, later clues and hints
//!   cost score
//! - **Graded matching**: Submissions are normalized and matched keyword by
//!   keyword, so partial understanding earns partial credit
//! - **Inspectable reports**: Every grade lists what matched and what was
//!   missed
//! - **Durable sessions**: Session state serializes cleanly, so hosts can
//!   persist attempts between commands
//!
//! ## Example
//!
//! ```rust,no_run
//! use incident_drill::{AttemptScorer, CaseCatalog, ClueRevealController, DiagnosisMatcher};
//! use incident_drill::core::types::CaseId;
//!
//! // Load the embedded corpus of cases
//! let catalog = CaseCatalog::load_embedded().unwrap();
//!
//! // Start a session; clue 1 comes for free
//! let controller = ClueRevealController::new(&catalog);
//! let mut session = controller.start(&CaseId::new("connection-pool-exhaustion")).unwrap();
//!
//! // Take one more clue, then commit to a diagnosis
//! let clue = controller.reveal_next(&mut session).unwrap();
//! println!("clue {}: {}", clue.id, clue.content);
//!
//! let case = catalog.get(session.case_id()).unwrap();
//! let report = DiagnosisMatcher::new().evaluate(case, "an unreleased connection drained the pool");
//! let result = AttemptScorer::new().finalize(&mut session, &report).unwrap();
//!
//! println!("{}: {} points", result.case_id, result.score);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Case corpus storage and lookup
//! - [`core`]: Core data types for cases, clues, and sessions
//! - [`session`]: The clue reveal controller
//! - [`matching`]: Diagnosis matching and attempt scoring
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod session;

// Re-export commonly used types for convenience
pub use crate::catalog::store::CaseCatalog;
pub use crate::core::case::{Case, CaseSummary, Solution};
pub use crate::core::clue::Clue;
pub use crate::core::session::{Session, SessionError, Submission};
pub use crate::core::types::*;
pub use crate::matching::matcher::{DiagnosisMatcher, MatchReport, MatcherConfig};
pub use crate::matching::scoring::{AttemptResult, AttemptScorer, ScoringPolicy};
pub use crate::session::controller::ClueRevealController;
