//! Cases command - browse the case corpus.
//!
//! Lists cases, shows a single case in detail, or exports the corpus as
//! JSON. `show` keeps clue contents and the solution hidden unless `--full`
//! is passed, so a drill host can check a case id without spoiling the
//! drill for themselves.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::catalog::store::{CaseCatalog, CaseFilter};
use crate::cli::OutputFormat;
use crate::core::case::Case;
use crate::core::types::{CaseId, Difficulty};

/// Arguments for the cases command
#[derive(Args)]
pub struct CasesArgs {
    #[command(subcommand)]
    pub command: CasesCommands,
}

#[derive(Subcommand)]
pub enum CasesCommands {
    /// List cases in the corpus
    List {
        /// Load the corpus from a JSON file instead of the embedded one
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Filter by difficulty (junior, mid, senior, principal)
        #[arg(long)]
        difficulty: Option<String>,

        /// Filter by category (case-insensitive)
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one case in detail
    Show {
        /// Case id, as listed by `cases list`
        id: String,

        /// Load the corpus from a JSON file instead of the embedded one
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Also print clue contents, hints, and the solution
        #[arg(long)]
        full: bool,
    },

    /// Export the corpus as JSON
    Export {
        /// Output file path
        output: PathBuf,

        /// Load the corpus from a JSON file instead of the embedded one
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
}

/// Execute the cases command
///
/// # Errors
///
/// Returns an error if the corpus cannot be loaded or the requested case
/// does not exist.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: CasesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CasesCommands::List {
            corpus,
            difficulty,
            category,
        } => run_list(
            corpus.as_deref(),
            difficulty.as_deref(),
            category.as_deref(),
            format,
            verbose,
        ),
        CasesCommands::Show { id, corpus, full } => {
            run_show(&id, corpus.as_deref(), full, format, verbose)
        }
        CasesCommands::Export { output, corpus } => run_export(&output, corpus.as_deref(), verbose),
    }
}

fn run_list(
    corpus: Option<&Path>,
    difficulty: Option<&str>,
    category: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(corpus, verbose)?;

    let filter = CaseFilter {
        difficulty: difficulty.map(parse_difficulty).transpose()?,
        category: category.map(str::to_string),
    };
    let summaries = catalog.list(&filter);

    if verbose {
        eprintln!("{} of {} cases match the filter", summaries.len(), catalog.len());
    }

    match format {
        OutputFormat::Text => {
            if summaries.is_empty() {
                println!("No cases match the filter.");
                return Ok(());
            }

            // Column widths adapt to the data so long ids do not wrap
            let id_width = summaries.iter().map(|s| s.id.0.len()).max().unwrap_or(0).max(2);
            let category_width = summaries
                .iter()
                .map(|s| s.category.len())
                .max()
                .unwrap_or(0)
                .max(8);

            println!(
                "{:<id_width$}  {:<10}  {:<category_width$}  {:>5}  TITLE",
                "ID", "DIFFICULTY", "CATEGORY", "CLUES",
            );
            for summary in &summaries {
                println!(
                    "{:<id_width$}  {:<10}  {:<category_width$}  {:>5}  {}",
                    summary.id.0,
                    summary.difficulty.to_string(),
                    summary.category,
                    summary.clue_count,
                    truncate(&summary.title, 60),
                );
            }
            println!("\n{} cases", summaries.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        OutputFormat::Tsv => {
            println!("id\ttitle\tdifficulty\tcategory\tclue_count");
            for summary in &summaries {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    summary.id.0,
                    summary.title,
                    summary.difficulty,
                    summary.category,
                    summary.clue_count,
                );
            }
        }
    }

    Ok(())
}

fn run_show(
    id: &str,
    corpus: Option<&Path>,
    full: bool,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(corpus, verbose)?;
    let case = catalog.get(&CaseId::new(id))?;

    match format {
        OutputFormat::Text => print_case_text(case, full),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&case_json(case, full))?);
        }
        OutputFormat::Tsv => print_case_tsv(case, full),
    }

    Ok(())
}

fn run_export(output: &Path, corpus: Option<&Path>, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(corpus, verbose)?;
    let json = catalog.to_json()?;
    std::fs::write(output, json)?;
    println!("Exported {} cases to {}", catalog.len(), output.display());
    Ok(())
}

fn print_case_text(case: &Case, full: bool) {
    println!("Case: {}", case.id);
    println!("   Title:      {}", case.title);
    println!("   Difficulty: {}", case.difficulty);
    println!("   Category:   {}", case.category);
    println!("   Clues:      {}", case.clue_count());

    if full {
        for clue in &case.clues {
            println!("\nClue {} [{}]", clue.id, clue.kind);
            println!("   {}", clue.content);
            if let Some(hint) = &clue.hint {
                println!("   Hint: {hint}");
            }
        }

        println!("\nSolution");
        println!("   Diagnosis:   {}", case.solution.diagnosis);
        println!("   Keywords:    {}", case.solution.keywords.join(", "));
        println!("   Remediation: {}", case.solution.remediation);
    } else {
        println!();
        for clue in &case.clues {
            let hint_marker = if clue.has_hint() { "hint available" } else { "" };
            println!("   Clue {} [{:<9}] {}", clue.id, clue.kind.to_string(), hint_marker);
        }
        println!("\nClue contents and the solution are hidden. Pass --full to print them.");
    }
}

fn print_case_tsv(case: &Case, full: bool) {
    if full {
        println!("clue_id\tkind\tcontent\thint");
        for clue in &case.clues {
            println!(
                "{}\t{}\t{}\t{}",
                clue.id,
                clue.kind,
                clue.content,
                clue.hint.as_deref().unwrap_or(""),
            );
        }
    } else {
        println!("clue_id\tkind\thas_hint");
        for clue in &case.clues {
            println!("{}\t{}\t{}", clue.id, clue.kind, clue.has_hint());
        }
    }
}

fn case_json(case: &Case, full: bool) -> serde_json::Value {
    let clues: Vec<serde_json::Value> = case
        .clues
        .iter()
        .map(|clue| {
            if full {
                serde_json::json!({
                    "id": clue.id,
                    "kind": clue.kind,
                    "content": clue.content,
                    "hint": clue.hint,
                })
            } else {
                serde_json::json!({
                    "id": clue.id,
                    "kind": clue.kind,
                    "has_hint": clue.has_hint(),
                })
            }
        })
        .collect();

    let mut value = serde_json::json!({
        "id": case.id.0,
        "title": case.title,
        "difficulty": case.difficulty,
        "category": case.category,
        "clue_count": case.clue_count(),
        "clues": clues,
    });

    if full {
        value["solution"] = serde_json::json!({
            "diagnosis": case.solution.diagnosis,
            "keywords": case.solution.keywords,
            "remediation": case.solution.remediation,
        });
    }

    value
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

    if verbose {
        eprintln!("Corpus ready: {} cases", catalog.len());
    }
    Ok(catalog)
}

fn parse_difficulty(value: &str) -> anyhow::Result<Difficulty> {
    match value.to_lowercase().as_str() {
        "junior" => Ok(Difficulty::Junior),
        "mid" => Ok(Difficulty::Mid),
        "senior" => Ok(Difficulty::Senior),
        "principal" => Ok(Difficulty::Principal),
        _ => anyhow::bail!("unknown difficulty '{value}' (expected junior, mid, senior, or principal)"),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
