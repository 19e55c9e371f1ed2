use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod core;
mod matching;
mod session;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("incident_drill=debug,info")
    } else {
        EnvFilter::new("incident_drill=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Cases(args) => {
            cli::cases::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Grade(args) => {
            cli::grade::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Play(args) => {
            cli::play::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
