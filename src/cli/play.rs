//! Play command - run an interactive drill session.
//!
//! Commands are read line by line from stdin, so the drill works both at a
//! terminal and scripted: `printf 'clue\nsubmit stale dns\n' | incident-drill
//! play stale-dns-after-failover`. The final result honors --format; the
//! conversation itself is always plain text.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Args;

use crate::catalog::store::CaseCatalog;
use crate::cli::OutputFormat;
use crate::core::case::Case;
use crate::core::clue::Clue;
use crate::core::session::Submission;
use crate::core::types::CaseId;
use crate::matching::matcher::{DiagnosisMatcher, MatchReport};
use crate::matching::scoring::{AttemptResult, AttemptScorer};
use crate::session::controller::ClueRevealController;

/// Arguments for the play command
#[derive(Args)]
pub struct PlayArgs {
    /// Case id, as listed by `cases list`
    #[arg(required = true)]
    pub case: String,

    /// Load the corpus from a JSON file instead of the embedded one
    #[arg(long)]
    pub corpus: Option<PathBuf>,
}

/// One line of player input
#[derive(Debug, PartialEq, Eq)]
enum PlayerCommand {
    Clue,
    Hint(u32),
    Try(String),
    Submit(String),
    Review,
    Abandon,
    Help,
    Unknown(String),
}

/// Execute the play command
///
/// # Errors
///
/// Returns an error if the corpus cannot be loaded, the case does not
/// exist, or stdin/stdout fail mid-drill.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: PlayArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(args.corpus.as_deref(), verbose)?;
    let case_id = CaseId::new(&args.case);
    let case = catalog.get(&case_id)?;

    let controller = ClueRevealController::new(&catalog);
    let matcher = DiagnosisMatcher::new();
    let scorer = AttemptScorer::new();

    let mut session = controller.start(&case_id)?;

    print_banner(case);
    if let Some(clue) = case.clue(1) {
        print_clue(clue);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut outcome: Option<(MatchReport, AttemptResult)> = None;

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF ends the run like an abandon
            println!();
            session.abandon()?;
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            PlayerCommand::Clue => match controller.reveal_next(&mut session) {
                Ok(clue) => print_clue(clue),
                Err(err) => println!("{err}"),
            },
            PlayerCommand::Hint(clue_id) => {
                match controller.reveal_hint(&mut session, clue_id) {
                    Ok(hint) => println!("Hint for clue {clue_id}: {hint}"),
                    Err(err) => println!("{err}"),
                }
            }
            PlayerCommand::Try(text) => {
                let report = matcher.evaluate(case, &text);
                let submission = Submission {
                    text: report.submission_text.clone(),
                    submitted_at: Utc::now(),
                    match_ratio: report.match_ratio,
                    classification: report.classification,
                };
                match session.record_submission(submission) {
                    Ok(()) => print_try(&report),
                    Err(err) => println!("{err}"),
                }
            }
            PlayerCommand::Submit(text) => {
                let report = matcher.evaluate(case, &text);
                let result = scorer.finalize(&mut session, &report)?;
                outcome = Some((report, result));
                break;
            }
            PlayerCommand::Review => match controller.revealed_clues(&session) {
                Ok(clues) => {
                    for clue in clues {
                        print_clue(clue);
                    }
                }
                Err(err) => println!("{err}"),
            },
            PlayerCommand::Abandon => {
                session.abandon()?;
                break;
            }
            PlayerCommand::Help => print_help(),
            PlayerCommand::Unknown(text) => {
                println!("Unrecognized command '{text}' (try 'help')");
            }
        }
    }

    match outcome {
        Some((report, result)) => match format {
            OutputFormat::Text => print_result_text(case, &report, &result),
            OutputFormat::Json => print_result_json(&report, &result)?,
            OutputFormat::Tsv => print_result_tsv(&report, &result),
        },
        None => {
            println!(
                "\nDrill abandoned after {} clues.",
                session.revealed_clue_ids().len()
            );
            print_solution(case);
        }
    }

    Ok(())
}

fn parse_command(line: &str) -> PlayerCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "clue" | "next" => PlayerCommand::Clue,
        "hint" => match rest.parse::<u32>() {
            Ok(clue_id) => PlayerCommand::Hint(clue_id),
            Err(_) => PlayerCommand::Unknown(line.to_string()),
        },
        "try" if !rest.is_empty() => PlayerCommand::Try(rest.to_string()),
        "submit" if !rest.is_empty() => PlayerCommand::Submit(rest.to_string()),
        "review" | "board" => PlayerCommand::Review,
        "abandon" | "quit" | "q" => PlayerCommand::Abandon,
        "help" | "?" => PlayerCommand::Help,
        _ => PlayerCommand::Unknown(line.to_string()),
    }
}

fn print_banner(case: &Case) {
    println!("Incident drill: {}", case.title);
    println!("   Case:       {}", case.id);
    println!("   Difficulty: {}", case.difficulty);
    println!("   Category:   {}", case.category);
    println!("   Clues:      {} (the first is free)", case.clue_count());
    println!();
    println!("Type 'help' for commands. Submit when you think you know the root cause.");
}

fn print_clue(clue: &Clue) {
    println!("\nClue {} [{}]", clue.id, clue.kind);
    println!("   {}", clue.content);
    if clue.has_hint() {
        println!("   (hint available: hint {})", clue.id);
    }
}

fn print_try(report: &MatchReport) {
    println!(
        "Practice try: {} ({:.0}% of rubric keywords)",
        report.classification,
        report.match_ratio * 100.0,
    );
    if !report.matched_keywords.is_empty() {
        println!("   Found so far: {}", report.matched_keywords.join(", "));
    }
}

fn print_help() {
    println!("Commands:");
    println!("   clue            reveal the next clue (costs points after the first)");
    println!("   hint <id>       reveal the hint on an already-revealed clue (costs points)");
    println!("   try <text>      grade a diagnosis without ending the drill (free)");
    println!("   submit <text>   grade a diagnosis and end the drill");
    println!("   review          reprint the clues revealed so far");
    println!("   abandon         give up and see the solution");
}

fn print_result_text(case: &Case, report: &MatchReport, result: &AttemptResult) {
    println!(
        "\nFinal: {} ({}/{} rubric keywords, {:.0}%)",
        report.classification,
        report.matched_keywords.len(),
        report.keyword_total,
        report.match_ratio * 100.0,
    );
    if !report.missed_keywords.is_empty() {
        println!("   Missed keywords: {}", report.missed_keywords.join(", "));
    }
    println!(
        "   Score: {:.0} ({} clues revealed, {} billable, {} hints, {})",
        result.score,
        result.clues_revealed,
        result.billable_reveals,
        result.hints_used,
        format_elapsed(result.elapsed),
    );

    print_solution(case);
}

fn print_result_json(report: &MatchReport, result: &AttemptResult) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "case": result.case_id.0,
        "classification": report.classification,
        "ratio": report.match_ratio,
        "matched_keywords": report.matched_keywords,
        "missed_keywords": report.missed_keywords,
        "score": result.score,
        "clues_revealed": result.clues_revealed,
        "billable_reveals": result.billable_reveals,
        "hints_used": result.hints_used,
        "elapsed_seconds": result.elapsed.num_seconds(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_result_tsv(report: &MatchReport, result: &AttemptResult) {
    println!("case\tclassification\tratio\tscore\tclues_revealed\tbillable_reveals\thints_used\telapsed_seconds");
    println!(
        "{}\t{}\t{:.4}\t{:.0}\t{}\t{}\t{}\t{}",
        result.case_id,
        report.classification,
        report.match_ratio,
        result.score,
        result.clues_revealed,
        result.billable_reveals,
        result.hints_used,
        result.elapsed.num_seconds(),
    );
}

fn print_solution(case: &Case) {
    println!("\nSolution");
    println!("   Diagnosis:   {}", case.solution.diagnosis);
    println!("   Remediation: {}", case.solution.remediation);
}

fn format_elapsed(elapsed: chrono::Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{}m{:02}s", secs / 60, secs % 60)
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
