//! Core data types for incident drill cases and sessions.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Clue`]: A single piece of evidence, revealed in a fixed order
//! - [`Case`], [`Solution`]: A drill case and the rubric it is graded against
//! - [`Session`], [`Submission`]: Mutable per-attempt state and its history
//! - [`CaseId`], [`Difficulty`], [`ClueKind`]: Case metadata types
//! - [`MatchClass`], [`SessionStatus`]: Result and lifecycle classification
//!
//! ## Normalization
//!
//! Diagnosis text and rubric keywords are only ever compared in normalized
//! form (see [`keywords::normalize_phrase`]): lowercased, punctuation mapped
//! to spaces, interior hyphens preserved, whitespace collapsed. Keyword hits
//! must land on token boundaries, so `cache` never matches inside `cached`.
//!
//! [`Clue`]: clue::Clue
//! [`Case`]: case::Case
//! [`Solution`]: case::Solution
//! [`Session`]: session::Session
//! [`Submission`]: session::Submission
//! [`CaseId`]: types::CaseId
//! [`Difficulty`]: types::Difficulty
//! [`ClueKind`]: types::ClueKind
//! [`MatchClass`]: types::MatchClass
//! [`SessionStatus`]: types::SessionStatus

pub mod case;
pub mod clue;
pub mod keywords;
pub mod session;
pub mod types;
