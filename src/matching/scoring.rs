use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::session::{Session, SessionError, Submission};
use crate::core::types::{CaseId, MatchClass};
use crate::matching::matcher::MatchReport;

/// Safely convert usize to f64 for ratio and penalty arithmetic
///
/// This function explicitly handles the precision loss that occurs when
/// converting usize to f64 on 64-bit platforms. Rubric and clue counts are
/// tiny, far inside the safe range of f64 mantissa precision.
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Tunable scoring knobs.
///
/// `score = base(class) - clue_penalty * billable_reveals - hint_penalty *
/// hints_used`, clamped to `floor`. A `NoMatch` attempt has base 0 no matter
/// what; elapsed time is reported but never scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Base awarded for a strong match
    pub strong_base: f64,

    /// Base awarded for a partial match
    pub partial_base: f64,

    /// Deducted per revealed clue after the free first one
    pub clue_penalty: f64,

    /// Deducted per hint taken
    pub hint_penalty: f64,

    /// Scores never go below this
    pub floor: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            strong_base: 100.0,
            partial_base: 40.0,
            clue_penalty: 10.0,
            hint_penalty: 5.0,
            floor: 0.0,
        }
    }
}

/// Everything a host needs to present a finalized attempt
#[derive(Debug, Clone)]
pub struct AttemptResult {
    /// Which case was attempted
    pub case_id: CaseId,

    /// Final score under the scorer's policy
    pub score: f64,

    /// Band the grading fell into
    pub classification: MatchClass,

    /// Fraction of rubric keywords found
    pub match_ratio: f64,

    /// Clues on the board when the attempt ended, free first clue included
    pub clues_revealed: usize,

    /// Reveals that were actually billed
    pub billable_reveals: usize,

    /// Hints taken
    pub hints_used: usize,

    /// Wall-clock time from start to submission; informational only
    pub elapsed: Duration,
}

/// Turns a graded submission into a final score and closes out the attempt
pub struct AttemptScorer {
    policy: ScoringPolicy,
}

impl AttemptScorer {
    /// Create a scorer with the default policy
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: ScoringPolicy::default(),
        }
    }

    /// Create a scorer with a custom policy
    #[must_use]
    pub fn with_policy(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score a graded report against a session's reveal and hint usage.
    ///
    /// Pure; does not change the session. The same report scores lower on a
    /// session that took more clues or hints, never higher.
    #[must_use]
    pub fn score(&self, session: &Session, report: &MatchReport) -> f64 {
        let base = match report.classification {
            MatchClass::Strong => self.policy.strong_base,
            MatchClass::Partial => self.policy.partial_base,
            MatchClass::NoMatch => 0.0,
        };

        let penalties = self.policy.clue_penalty * count_to_f64(session.billable_reveals())
            + self.policy.hint_penalty * count_to_f64(session.hints_used().len());

        (base - penalties).max(self.policy.floor)
    }

    /// Finalize an attempt: record the submission, move the session to
    /// `Submitted`, and produce the result a host presents.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the session is not in progress, which also covers
    /// finalizing twice.
    pub fn finalize(
        &self,
        session: &mut Session,
        report: &MatchReport,
    ) -> Result<AttemptResult, SessionError> {
        session.ensure_in_progress()?;

        let submitted_at = Utc::now();
        session.record_submission(Submission {
            text: report.submission_text.clone(),
            submitted_at,
            match_ratio: report.match_ratio,
            classification: report.classification,
        })?;
        session.mark_submitted()?;

        Ok(AttemptResult {
            case_id: session.case_id().clone(),
            score: self.score(session, report),
            classification: report.classification,
            match_ratio: report.match_ratio,
            clues_revealed: session.revealed_clue_ids().len(),
            billable_reveals: session.billable_reveals(),
            hints_used: session.hints_used().len(),
            elapsed: submitted_at - session.started_at(),
        })
    }
}

impl Default for AttemptScorer {
    fn default() -> Self {
        Self::new()
    }
}
