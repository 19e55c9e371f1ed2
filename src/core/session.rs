//! Per-attempt session state.
//!
//! A [`Session`] tracks one run at one case: which clues and hints have been
//! taken, what was submitted, and where the attempt is in its lifecycle.
//!
//! Status moves strictly forward:
//!
//! `NotStarted -> InProgress -> Submitted -> Closed`, with `InProgress ->
//! Closed` for abandoned runs. Only `InProgress` accepts reveals, hints, and
//! submissions; everything else answers with `InvalidState`.
//!
//! Sessions serialize cleanly so a host can persist them between commands;
//! all set/history fields are concrete data, nothing borrowed.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{CaseId, MatchClass, SessionStatus};

/// Errors raised while driving a session through a drill
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unknown case: {0}")]
    CaseNotFound(CaseId),

    #[error("all {total} clues already revealed")]
    AllCluesRevealed { total: usize },

    #[error("clue {clue_id} does not exist (case has {total} clues)")]
    UnknownClue { clue_id: u32, total: usize },

    #[error("clue {clue_id} has not been revealed yet")]
    ClueNotYetRevealed { clue_id: u32 },

    #[error("clue {clue_id} has no hint")]
    NoHintAvailable { clue_id: u32 },

    #[error("session is {actual}, expected {expected}")]
    InvalidState {
        expected: SessionStatus,
        actual: SessionStatus,
    },
}

/// One graded submission within a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// The text as the participant typed it
    pub text: String,

    /// When it was graded
    pub submitted_at: DateTime<Utc>,

    /// Fraction of rubric keywords found, in `[0.0, 1.0]`
    pub match_ratio: f64,

    /// Band the ratio fell into
    pub classification: MatchClass,
}

/// State of a single attempt at a single case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    case_id: CaseId,
    status: SessionStatus,
    started_at: DateTime<Utc>,
    revealed_clue_ids: BTreeSet<u32>,
    hints_used: BTreeSet<u32>,
    submissions: Vec<Submission>,
}

impl Session {
    /// Create a session that has not started yet.
    ///
    /// Hosts normally get sessions from the reveal controller, which starts
    /// them and hands out the first clue in the same step.
    #[must_use]
    pub fn new(case_id: CaseId) -> Self {
        Self {
            case_id,
            status: SessionStatus::NotStarted,
            started_at: Utc::now(),
            revealed_clue_ids: BTreeSet::new(),
            hints_used: BTreeSet::new(),
            submissions: Vec::new(),
        }
    }

    #[must_use]
    pub fn case_id(&self) -> &CaseId {
        &self.case_id
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// When the drill clock started (stamped by `start`)
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Ids of clues revealed so far, ascending
    #[must_use]
    pub fn revealed_clue_ids(&self) -> &BTreeSet<u32> {
        &self.revealed_clue_ids
    }

    /// Ids of clues whose hint has been taken, ascending
    #[must_use]
    pub fn hints_used(&self) -> &BTreeSet<u32> {
        &self.hints_used
    }

    #[must_use]
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Reveals that count against the score.
    ///
    /// The first clue comes free with `start`, so only reveals past it are
    /// billed.
    #[must_use]
    pub fn billable_reveals(&self) -> usize {
        self.revealed_clue_ids.len().saturating_sub(1)
    }

    /// Check that the session still accepts reveals, hints, and submissions.
    ///
    /// # Errors
    ///
    /// `InvalidState` with the actual status otherwise.
    pub fn ensure_in_progress(&self) -> Result<(), SessionError> {
        self.require(SessionStatus::InProgress)
    }

    /// Move `NotStarted -> InProgress` and stamp the drill clock.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the session already started.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.require(SessionStatus::NotStarted)?;
        self.status = SessionStatus::InProgress;
        self.started_at = Utc::now();
        Ok(())
    }

    /// Record a clue as revealed.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless the session is in progress.
    pub fn record_reveal(&mut self, clue_id: u32) -> Result<(), SessionError> {
        self.require(SessionStatus::InProgress)?;
        self.revealed_clue_ids.insert(clue_id);
        Ok(())
    }

    /// Record that the hint on a revealed clue was taken.
    ///
    /// Taking the same hint twice is recorded once; re-reading advice is not
    /// billed again.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless in progress; `ClueNotYetRevealed` if the clue
    /// itself has not been revealed.
    pub fn record_hint(&mut self, clue_id: u32) -> Result<(), SessionError> {
        self.require(SessionStatus::InProgress)?;
        if !self.revealed_clue_ids.contains(&clue_id) {
            return Err(SessionError::ClueNotYetRevealed { clue_id });
        }
        self.hints_used.insert(clue_id);
        Ok(())
    }

    /// Append a graded submission to the history.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless the session is in progress.
    pub fn record_submission(&mut self, submission: Submission) -> Result<(), SessionError> {
        self.require(SessionStatus::InProgress)?;
        self.submissions.push(submission);
        Ok(())
    }

    /// Move `InProgress -> Submitted` once an attempt has been scored.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the session is not in progress, including when it
    /// was already finalized.
    pub fn mark_submitted(&mut self) -> Result<(), SessionError> {
        self.require(SessionStatus::InProgress)?;
        self.status = SessionStatus::Submitted;
        Ok(())
    }

    /// Give up on an in-progress run (`InProgress -> Closed`).
    ///
    /// # Errors
    ///
    /// `InvalidState` unless the session is in progress.
    pub fn abandon(&mut self) -> Result<(), SessionError> {
        self.require(SessionStatus::InProgress)?;
        self.status = SessionStatus::Closed;
        Ok(())
    }

    /// Retire a submitted session (`Submitted -> Closed`).
    ///
    /// # Errors
    ///
    /// `InvalidState` unless the session is submitted.
    pub fn close(&mut self) -> Result<(), SessionError> {
        self.require(SessionStatus::Submitted)?;
        self.status = SessionStatus::Closed;
        Ok(())
    }

    fn require(&self, expected: SessionStatus) -> Result<(), SessionError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                expected,
                actual: self.status,
            })
        }
    }

    #[cfg(test)]
    pub fn with_started_at(mut self, at: DateTime<Utc>) -> Self {
        self.started_at = at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_progress() -> Session {
        let mut session = Session::new(CaseId::new("pool-leak"));
        session.start().unwrap();
        session.record_reveal(1).unwrap();
        session
    }

    #[test]
    fn test_new_session_is_not_started() {
        let session = Session::new(CaseId::new("pool-leak"));
        assert_eq!(session.status(), SessionStatus::NotStarted);
        assert!(session.revealed_clue_ids().is_empty());
    }

    #[test]
    fn test_start_twice_is_invalid() {
        let mut session = in_progress();
        let err = session.start().unwrap_err();
        assert!(matches!(err, SessionError::InvalidState { .. }));
    }

    #[test]
    fn test_billable_reveals_excludes_first_clue() {
        let mut session = in_progress();
        assert_eq!(session.billable_reveals(), 0);

        session.record_reveal(2).unwrap();
        session.record_reveal(3).unwrap();
        assert_eq!(session.billable_reveals(), 2);
    }

    #[test]
    fn test_hint_requires_revealed_clue() {
        let mut session = in_progress();
        let err = session.record_hint(2).unwrap_err();
        assert!(matches!(err, SessionError::ClueNotYetRevealed { clue_id: 2 }));

        session.record_reveal(2).unwrap();
        session.record_hint(2).unwrap();
        assert_eq!(session.hints_used().len(), 1);
    }

    #[test]
    fn test_repeated_hint_recorded_once() {
        let mut session = in_progress();
        session.record_hint(1).unwrap();
        session.record_hint(1).unwrap();
        assert_eq!(session.hints_used().len(), 1);
    }

    #[test]
    fn test_submitted_rejects_further_actions() {
        let mut session = in_progress();
        session.mark_submitted().unwrap();

        assert!(matches!(
            session.record_reveal(2),
            Err(SessionError::InvalidState { .. })
        ));
        assert!(matches!(
            session.record_hint(1),
            Err(SessionError::InvalidState { .. })
        ));
        assert!(matches!(
            session.mark_submitted(),
            Err(SessionError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_abandon_only_from_in_progress() {
        let mut session = in_progress();
        session.abandon().unwrap();
        assert_eq!(session.status(), SessionStatus::Closed);
        assert!(session.abandon().is_err());

        let mut fresh = Session::new(CaseId::new("pool-leak"));
        assert!(fresh.abandon().is_err());
    }

    #[test]
    fn test_close_only_from_submitted() {
        let mut session = in_progress();
        assert!(session.close().is_err());

        session.mark_submitted().unwrap();
        session.close().unwrap();
        assert_eq!(session.status(), SessionStatus::Closed);
    }

    #[test]
    fn test_session_serde_roundtrip() {
        let mut session = in_progress();
        session.record_reveal(2).unwrap();
        session.record_hint(2).unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(back.status(), SessionStatus::InProgress);
        assert_eq!(back.revealed_clue_ids().len(), 2);
        assert_eq!(back.hints_used().len(), 1);
        assert_eq!(back.case_id(), &CaseId::new("pool-leak"));
    }
}
