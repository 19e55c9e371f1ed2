//! Grade command - grade a written diagnosis against a case in one shot.
//!
//! Unlike `play`, this command does not run a session interactively. The
//! number of clues and hints consumed is declared up front, which makes it
//! useful for re-grading a transcript after a group drill or for checking
//! how a rubric behaves against candidate phrasings.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::catalog::store::CaseCatalog;
use crate::cli::OutputFormat;
use crate::core::case::Case;
use crate::core::session::{Session, SessionError};
use crate::core::types::{CaseId, MatchClass};
use crate::matching::matcher::{DiagnosisMatcher, MatchReport, MatcherConfig};
use crate::matching::scoring::{AttemptResult, AttemptScorer, ScoringPolicy};

/// Arguments for the grade command
#[derive(Args)]
pub struct GradeArgs {
    /// Case id, as listed by `cases list`
    #[arg(required = true)]
    pub case: String,

    /// Diagnosis text, or - to read it from stdin
    #[arg(required = true)]
    pub diagnosis: String,

    /// Clues revealed before submitting (the first one is free)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub clues: u32,

    /// Hints taken before submitting
    #[arg(long, default_value = "0")]
    pub hints: u32,

    /// Load the corpus from a JSON file instead of the embedded one
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    // === Grading options ===
    /// Keyword ratio that grades as a strong match, in percent (0-100, default 50)
    #[arg(long, default_value = "50", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub strong_cutoff: u32,

    /// Points charged per clue after the first (0-100, default 10)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub clue_penalty: u32,

    /// Points charged per hint (0-100, default 5)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub hint_penalty: u32,
}

/// Execute the grade command
///
/// # Errors
///
/// Returns an error if the corpus cannot be loaded, the case does not
/// exist, or the declared clue/hint counts do not fit the case.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: GradeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let diagnosis = read_diagnosis(&args.diagnosis)?;
    let catalog = load_catalog(args.corpus.as_deref(), verbose)?;
    let case = catalog.get(&CaseId::new(&args.case))?;

    if args.clues as usize > case.clue_count() {
        anyhow::bail!(
            "case '{}' has only {} clues, cannot reveal {}",
            case.id,
            case.clue_count(),
            args.clues,
        );
    }
    if args.hints > args.clues {
        anyhow::bail!(
            "cannot take more hints than revealed clues ({} hints, {} clues)",
            args.hints,
            args.clues,
        );
    }

    let config = MatcherConfig {
        strong_threshold: f64::from(args.strong_cutoff) / 100.0,
        ..MatcherConfig::default()
    };
    let policy = ScoringPolicy {
        clue_penalty: f64::from(args.clue_penalty),
        hint_penalty: f64::from(args.hint_penalty),
        ..ScoringPolicy::default()
    };

    if verbose {
        eprintln!(
            "Grading against '{}': {} rubric keywords, strong at {:.0}%, -{:.0} per extra clue, -{:.0} per hint",
            case.id,
            case.solution.keyword_set.len(),
            config.strong_threshold * 100.0,
            policy.clue_penalty,
            policy.hint_penalty,
        );
    }

    let mut session = build_session(case.id.clone(), args.clues, args.hints)?;

    let matcher = DiagnosisMatcher::with_config(config);
    let report = matcher.evaluate(case, &diagnosis);

    let scorer = AttemptScorer::with_policy(policy);
    let result = scorer.finalize(&mut session, &report)?;

    match format {
        OutputFormat::Text => print_text(case, &report, &result, scorer.policy()),
        OutputFormat::Json => print_json(case, &report, &result, scorer.policy())?,
        OutputFormat::Tsv => print_tsv(&report, &result),
    }

    Ok(())
}

/// Replay the declared clue/hint consumption into a fresh session.
///
/// Hints attach to clues in order, which is enough for pricing: only the
/// count of distinct hints matters to the score.
fn build_session(case_id: CaseId, clues: u32, hints: u32) -> Result<Session, SessionError> {
    let mut session = Session::new(case_id);
    session.start()?;
    for clue_id in 1..=clues {
        session.record_reveal(clue_id)?;
    }
    for clue_id in 1..=hints {
        session.record_hint(clue_id)?;
    }
    Ok(session)
}

fn read_diagnosis(arg: &str) -> anyhow::Result<String> {
    if arg == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(arg.to_string())
    }
}

fn base_points(policy: &ScoringPolicy, classification: MatchClass) -> f64 {
    match classification {
        MatchClass::Strong => policy.strong_base,
        MatchClass::Partial => policy.partial_base,
        MatchClass::NoMatch => 0.0,
    }
}

fn print_text(case: &Case, report: &MatchReport, result: &AttemptResult, policy: &ScoringPolicy) {
    println!("\nGrading against: {} ({})", case.id, case.title);

    println!(
        "\n   Match: {} ({}/{} rubric keywords, {:.0}%)",
        report.classification,
        report.matched_keywords.len(),
        report.keyword_total,
        report.match_ratio * 100.0,
    );
    if !report.matched_keywords.is_empty() {
        println!("   Found:   {}", report.matched_keywords.join(", "));
    }
    if !report.missed_keywords.is_empty() {
        println!("   Missing: {}", report.missed_keywords.join(", "));
    }

    println!(
        "\n   Score: {:.0} = {:.0} base - {}×{:.0} extra clues - {}×{:.0} hints",
        result.score,
        base_points(policy, report.classification),
        result.billable_reveals,
        policy.clue_penalty,
        result.hints_used,
        policy.hint_penalty,
    );
    println!(
        "   Consumed: {} clues revealed ({} billable), {} hints",
        result.clues_revealed, result.billable_reveals, result.hints_used,
    );
}

fn print_json(
    case: &Case,
    report: &MatchReport,
    result: &AttemptResult,
    policy: &ScoringPolicy,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "case": {
            "id": case.id.0,
            "title": case.title,
            "difficulty": case.difficulty,
        },
        "match": {
            "classification": report.classification,
            "ratio": report.match_ratio,
            "matched_keywords": report.matched_keywords,
            "missed_keywords": report.missed_keywords,
            "keyword_total": report.keyword_total,
        },
        "score": {
            "value": result.score,
            "base": base_points(policy, report.classification),
            "clue_penalty": policy.clue_penalty,
            "hint_penalty": policy.hint_penalty,
            "clues_revealed": result.clues_revealed,
            "billable_reveals": result.billable_reveals,
            "hints_used": result.hints_used,
        },
        "elapsed_seconds": result.elapsed.num_seconds(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(report: &MatchReport, result: &AttemptResult) {
    println!(
        "case\tclassification\tratio\tmatched\tmissed\tkeyword_total\tscore\tclues_revealed\tbillable_reveals\thints_used\telapsed_seconds"
    );
    println!(
        "{}\t{}\t{:.4}\t{}\t{}\t{}\t{:.0}\t{}\t{}\t{}\t{}",
        result.case_id,
        report.classification,
        report.match_ratio,
        report.matched_keywords.join(","),
        report.missed_keywords.join(","),
        report.keyword_total,
        result.score,
        result.clues_revealed,
        result.billable_reveals,
        result.hints_used,
        result.elapsed.num_seconds(),
    );
}

fn load_catalog(corpus: Option<&Path>, verbose: bool) -> anyhow::Result<CaseCatalog> {
    let catalog = match corpus {
        Some(path) => {
            if verbose {
                eprintln!("Loading corpus from {}", path.display());
            }
            CaseCatalog::load_from_file(path)?
        }
        None => CaseCatalog::load_embedded()?,
    };
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_session_counts_consumption() {
        let session = build_session(CaseId::new("pool-leak"), 3, 1).unwrap();
        assert_eq!(session.revealed_clue_ids().len(), 3);
        assert_eq!(session.billable_reveals(), 2);
        assert_eq!(session.hints_used().len(), 1);
    }

    #[test]
    fn test_build_session_first_clue_only() {
        let session = build_session(CaseId::new("pool-leak"), 1, 0).unwrap();
        assert_eq!(session.billable_reveals(), 0);
        assert!(session.hints_used().is_empty());
    }

    #[test]
    fn test_build_session_rejects_hint_on_hidden_clue() {
        // Callers validate hints <= clues; the session enforces it too
        let err = build_session(CaseId::new("pool-leak"), 1, 2).unwrap_err();
        assert!(matches!(err, SessionError::ClueNotYetRevealed { clue_id: 2 }));
    }

    #[test]
    fn test_read_diagnosis_passthrough() {
        assert_eq!(read_diagnosis("stale dns").unwrap(), "stale dns");
    }

    #[test]
    fn test_base_points_follow_classification() {
        let policy = ScoringPolicy::default();
        assert!(base_points(&policy, MatchClass::Strong) > base_points(&policy, MatchClass::Partial));
        assert_eq!(base_points(&policy, MatchClass::NoMatch), 0.0);
    }
}
