use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::case::Case;
use crate::core::keywords::normalize_phrase;
use crate::core::types::MatchClass;
use crate::matching::scoring::count_to_f64;

/// Default ratio at or above which a match is classified Strong
pub const DEFAULT_STRONG_THRESHOLD: f64 = 0.5;

/// Default exclusive lower bound of the Partial band
pub const DEFAULT_PARTIAL_THRESHOLD: f64 = 0.0;

/// Default submission length (characters) past which a warning is logged
pub const DEFAULT_MAX_SUBMISSION_LEN: usize = 2000;

/// Configuration for the diagnosis matcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Ratio at or above which a match is Strong
    pub strong_threshold: f64,

    /// Ratio must exceed this to count as Partial
    pub partial_threshold: f64,

    /// Advisory cap on submission length; longer input is still graded in
    /// full, but logged
    pub max_submission_len: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            strong_threshold: DEFAULT_STRONG_THRESHOLD,
            partial_threshold: DEFAULT_PARTIAL_THRESHOLD,
            max_submission_len: DEFAULT_MAX_SUBMISSION_LEN,
        }
    }
}

impl MatcherConfig {
    /// Band a non-zero match ratio into a class
    #[must_use]
    pub fn classify(&self, ratio: f64) -> MatchClass {
        if ratio >= self.strong_threshold {
            MatchClass::Strong
        } else if ratio > self.partial_threshold {
            MatchClass::Partial
        } else {
            MatchClass::NoMatch
        }
    }
}

/// What the matcher found in one submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// The text as submitted, before normalization
    pub submission_text: String,

    /// Band the ratio fell into
    pub classification: MatchClass,

    /// Matched keywords over total keywords, in `[0.0, 1.0]`
    pub match_ratio: f64,

    /// Rubric entries found in the submission, in rubric order
    pub matched_keywords: Vec<String>,

    /// Rubric entries the submission did not mention
    pub missed_keywords: Vec<String>,

    /// Size of the rubric (the ratio denominator)
    pub keyword_total: usize,
}

/// Grades free-text diagnoses against a case rubric.
///
/// Evaluation is pure: it looks only at the case and the text, never at
/// session state, so the same submission always grades the same way.
pub struct DiagnosisMatcher {
    config: MatcherConfig,
}

impl DiagnosisMatcher {
    /// Create a matcher with default thresholds
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: MatcherConfig::default(),
        }
    }

    /// Create a matcher with custom thresholds
    #[must_use]
    pub fn with_config(config: MatcherConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Evaluate a submission against a case.
    ///
    /// The submission is normalized, each rubric keyword is searched on token
    /// boundaries, and the hit ratio is banded into a [`MatchClass`]. A
    /// submission that hits nothing is always `NoMatch`, whatever the
    /// thresholds say, and one that normalizes to nothing skips the rubric
    /// scan entirely.
    #[must_use]
    pub fn evaluate(&self, case: &Case, submission: &str) -> MatchReport {
        let length = submission.chars().count();
        if length > self.config.max_submission_len {
            warn!(
                case_id = %case.id,
                length,
                limit = self.config.max_submission_len,
                "submission exceeds the configured length; grading it in full"
            );
        }

        let keywords = &case.solution.keyword_set;
        if keywords.is_empty() {
            // Validated corpora never produce this; a hand-built case that
            // skipped rebuild_keywords would.
            warn!(case_id = %case.id, "case has an empty rubric, grading as no match");
        }

        let normalized = normalize_phrase(submission);
        if normalized.is_empty() {
            // Nothing to scan for; the whole rubric is missed.
            return MatchReport {
                submission_text: submission.to_string(),
                classification: MatchClass::NoMatch,
                match_ratio: 0.0,
                matched_keywords: Vec::new(),
                missed_keywords: keywords.iter().map(str::to_string).collect(),
                keyword_total: keywords.len(),
            };
        }

        let hits = keywords.hits(&normalized);

        let match_ratio = if keywords.is_empty() {
            0.0
        } else {
            (count_to_f64(hits.len()) / count_to_f64(keywords.len())).clamp(0.0, 1.0)
        };

        let classification = if hits.is_empty() {
            MatchClass::NoMatch
        } else {
            self.config.classify(match_ratio)
        };

        let matched_keywords: Vec<String> = hits.iter().map(|k| (*k).to_string()).collect();
        let missed_keywords: Vec<String> = keywords
            .iter()
            .filter(|k| !hits.contains(k))
            .map(str::to_string)
            .collect();

        MatchReport {
            submission_text: submission.to_string(),
            classification,
            match_ratio,
            matched_keywords,
            missed_keywords,
            keyword_total: keywords.len(),
        }
    }
}

impl Default for DiagnosisMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::case::Solution;
    use crate::core::clue::Clue;
    use crate::core::types::{ClueKind, Difficulty};

    fn pool_case() -> Case {
        let solution = Solution::new(
            "A handler returns early without releasing its connection",
            vec!["connection pool".to_string(), "unreleased connection".to_string()],
            "roll back on every early return",
        )
        .unwrap();

        Case::new("pool-leak", "Checkout stalls", Difficulty::Mid, "database", solution)
            .with_clues(vec![Clue::new(1, ClueKind::Logs, "PoolTimeout")])
    }

    fn rubric_case(keywords: &[&str]) -> Case {
        let solution = Solution::new(
            "diagnosis",
            keywords.iter().map(|s| (*s).to_string()).collect(),
            "remediation",
        )
        .unwrap();
        Case::new("synthetic", "t", Difficulty::Junior, "test", solution)
            .with_clues(vec![Clue::new(1, ClueKind::Logs, "c")])
    }

    #[test]
    fn test_full_coverage_is_strong() {
        let case = pool_case();
        let matcher = DiagnosisMatcher::new();

        let report = matcher.evaluate(
            &case,
            "The connection pool drained because of an unreleased connection.",
        );
        assert_eq!(report.classification, MatchClass::Strong);
        assert!((report.match_ratio - 1.0).abs() < 1e-9);
        assert_eq!(report.keyword_total, 2);
        assert!(report.missed_keywords.is_empty());
    }

    #[test]
    fn test_half_coverage_sits_on_strong_boundary() {
        let case = pool_case();
        let matcher = DiagnosisMatcher::new();

        // One of two keywords; ratio 0.5 meets the default strong threshold
        let report = matcher.evaluate(&case, "the connection pool was exhausted");
        assert!((report.match_ratio - 0.5).abs() < 1e-9);
        assert_eq!(report.classification, MatchClass::Strong);
        assert_eq!(report.matched_keywords, vec!["connection pool"]);
        assert_eq!(report.missed_keywords, vec!["unreleased connection"]);
    }

    #[test]
    fn test_low_coverage_is_partial() {
        let case = rubric_case(&["alpha", "bravo", "charlie", "delta"]);
        let matcher = DiagnosisMatcher::new();

        let report = matcher.evaluate(&case, "only alpha here");
        assert!((report.match_ratio - 0.25).abs() < 1e-9);
        assert_eq!(report.classification, MatchClass::Partial);
    }

    #[test]
    fn test_no_hits_is_no_match() {
        let case = pool_case();
        let matcher = DiagnosisMatcher::new();

        let report = matcher.evaluate(&case, "the disk filled up overnight");
        assert_eq!(report.classification, MatchClass::NoMatch);
        assert!((report.match_ratio).abs() < 1e-9);
        assert!(report.matched_keywords.is_empty());
        assert_eq!(report.missed_keywords.len(), 2);
    }

    #[test]
    fn test_empty_submission_is_no_match() {
        let case = pool_case();
        let matcher = DiagnosisMatcher::new();

        let report = matcher.evaluate(&case, "");
        assert_eq!(report.classification, MatchClass::NoMatch);
        let report = matcher.evaluate(&case, "!!! ...");
        assert_eq!(report.classification, MatchClass::NoMatch);
    }

    #[test]
    fn test_blank_submission_reports_full_rubric_missed() {
        let case = pool_case();
        let matcher = DiagnosisMatcher::new();

        // Empty, whitespace-only, and symbol-only all normalize to nothing
        // and must come back with the same shape a scanned miss would have
        for submission in ["", "   \t  ", "?!? ..."] {
            let report = matcher.evaluate(&case, submission);
            assert_eq!(report.classification, MatchClass::NoMatch);
            assert!((report.match_ratio).abs() < 1e-9);
            assert!(report.matched_keywords.is_empty());
            assert_eq!(
                report.missed_keywords,
                vec!["connection pool", "unreleased connection"]
            );
            assert_eq!(report.keyword_total, 2);
            assert_eq!(report.submission_text, submission);
        }
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let case = pool_case();
        let matcher = DiagnosisMatcher::new();

        let report = matcher.evaluate(&case, "CONNECTION-POOL? No: Connection, Pool!");
        // "connection pool" matches the spaced occurrence, not the hyphenated one
        assert_eq!(report.matched_keywords, vec!["connection pool"]);
    }

    #[test]
    fn test_embedded_words_do_not_match() {
        let case = rubric_case(&["cache"]);
        let matcher = DiagnosisMatcher::new();

        assert_eq!(
            matcher.evaluate(&case, "everything was cached").classification,
            MatchClass::NoMatch
        );
        assert_eq!(
            matcher.evaluate(&case, "the cache was cold").classification,
            MatchClass::Strong
        );
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let case = rubric_case(&["pool", "leak"]);
        let matcher = DiagnosisMatcher::new();

        let report = matcher.evaluate(&case, "pool pool pool pool");
        assert!((report.match_ratio - 0.5).abs() < 1e-9);
        assert_eq!(report.matched_keywords, vec!["pool"]);
    }

    #[test]
    fn test_custom_thresholds() {
        let case = pool_case();
        let matcher = DiagnosisMatcher::with_config(MatcherConfig {
            strong_threshold: 0.9,
            ..Default::default()
        });

        // 0.5 no longer clears the bar
        let report = matcher.evaluate(&case, "the connection pool was exhausted");
        assert_eq!(report.classification, MatchClass::Partial);
    }

    #[test]
    fn test_overlength_submission_still_graded_fully() {
        let case = rubric_case(&["needle"]);
        let matcher = DiagnosisMatcher::new();

        let mut text = "hay ".repeat(1000);
        text.push_str("and finally the needle");
        assert!(text.chars().count() > DEFAULT_MAX_SUBMISSION_LEN);

        let report = matcher.evaluate(&case, &text);
        assert_eq!(report.classification, MatchClass::Strong);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let case = pool_case();
        let matcher = DiagnosisMatcher::new();

        let a = matcher.evaluate(&case, "unreleased connection somewhere");
        let b = matcher.evaluate(&case, "unreleased connection somewhere");
        assert_eq!(a.classification, b.classification);
        assert!((a.match_ratio - b.match_ratio).abs() < 1e-9);
        assert_eq!(a.matched_keywords, b.matched_keywords);
    }
}
