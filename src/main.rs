//! intake - proposal intake for repository workflows
//!
//! CLI binary that validates, moderates and publishes proposal documents.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use proposal_intake::config::{Config, ConfigInput};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Validate, moderate and publish proposal documents")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Show every phase and checklist entry, and debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Debug, Default)]
struct RunArgs {
    /// Path to the repository root (defaults to current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Directory holding the proposals, relative to the repository root
    #[arg(long)]
    proposals_dir: Option<PathBuf>,

    /// Registry base URL
    #[arg(long, env = "API_URL")]
    api_url: Option<String>,

    /// GitHub token (falls back to GITHUB_TOKEN)
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Repository to write identifiers back to, as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Dry run - evaluate and report without submitting or writing back
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate and publish every proposal (default)
    Run(RunArgs),

    /// Show how a single proposal document is parsed (offline)
    Inspect {
        /// Proposal document
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "proposal_intake=debug,intake=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: RunArgs, verbose: bool) -> Result<()> {
    let config = Config::resolve(ConfigInput {
        api_url: args.api_url,
        token: args.token,
        repository: args.repository,
        proposals_dir: args.proposals_dir,
        root: args.path,
        dry_run: args.dry_run,
    })?;

    let summary = cli::run_intake_command(&config, verbose).await?;
    if !summary.success() {
        bail!(
            "{} proposal(s) failed to process",
            summary.failures().count()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        None => run(cli.run, cli.verbose).await?,
        Some(Commands::Run(args)) => run(args, cli.verbose).await?,
        Some(Commands::Inspect { file }) => cli::run_inspect(&file)?,
    }

    Ok(())
}
