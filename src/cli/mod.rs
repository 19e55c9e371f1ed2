//! Command-line interface for incident-drill.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **cases**: List, show, or export cases from the corpus
//! - **grade**: Grade a written diagnosis against a case in one shot
//! - **play**: Run an interactive drill session
//!
//! ## Usage
//!
//! ```text
//! # List every case in the embedded corpus
//! incident-drill cases list
//!
//! # Only senior-level caching cases
//! incident-drill cases list --difficulty senior --category caching
//!
//! # Inspect a case; clue contents and the solution need --full
//! incident-drill cases show connection-pool-exhaustion --full
//!
//! # Grade a diagnosis as if three clues and one hint were taken
//! incident-drill grade connection-pool-exhaustion "connection pool leak" --clues 3 --hints 1
//!
//! # Pipe the diagnosis in
//! cat diagnosis.txt | incident-drill grade connection-pool-exhaustion -
//!
//! # JSON output for scripting
//! incident-drill grade connection-pool-exhaustion "stale dns entry" --format json
//!
//! # Interactive drill
//! incident-drill play connection-pool-exhaustion
//! ```

use clap::{Parser, Subcommand};

pub mod cases;
pub mod grade;
pub mod play;

#[derive(Parser)]
#[command(name = "incident-drill")]
#[command(author = "Incident Drill contributors")]
#[command(version)]
#[command(about = "Clue-by-clue incident diagnosis drills, graded against case rubrics")]
#[command(
    long_about = "incident-drill replays past production incidents as training drills.\n\nEach case unfolds clue by clue (logs, metrics, config, code, testimony) until you commit to a written diagnosis, which is matched against the case rubric:\n- Clues reveal in significance order and the first one is free\n- Every further clue and every hint costs points\n- Grading is keyword based and graded (strong / partial / no match), never all-or-nothing"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the case corpus
    Cases(cases::CasesArgs),

    /// Grade a diagnosis against a case in one shot
    Grade(grade::GradeArgs),

    /// Run an interactive drill session
    Play(play::PlayArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
