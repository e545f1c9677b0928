//! Run command - evaluate and publish every proposal in the repository

use crate::cli::CliProgress;
use crate::cli::style::Stylize;
use anstream::println;
use proposal_intake::config::Config;
use proposal_intake::error::Result;
use proposal_intake::host::{GitHubHost, RepositoryHost};
use proposal_intake::intake::{IntakeSummary, discover_proposals, run_intake};
use proposal_intake::registry::HttpRegistry;
use proposal_intake::types::ResolvedStatus;
use tracing::debug;

/// Run the intake pipeline for `config`
pub async fn run_intake_command(config: &Config, verbose: bool) -> Result<IntakeSummary> {
    let sources = discover_proposals(&config.root, &config.proposals_dir)?;
    if sources.is_empty() {
        println!(
            "No proposals found in {}",
            config.proposals_dir.display().accent()
        );
        return Ok(IntakeSummary::default());
    }

    let registry = HttpRegistry::new(config.registry_url.clone())?;
    let host = match &config.target {
        Some(target) => {
            debug!(owner = %target.owner, repo = %target.repo, "publishing to GitHub");
            Some(GitHubHost::new(
                &target.token,
                target.owner.clone(),
                target.repo.clone(),
                target.host.as_deref(),
            )?)
        }
        None => None,
    };

    let progress = if verbose {
        CliProgress::verbose()
    } else {
        CliProgress::compact()
    };
    let summary = run_intake(
        &sources,
        &registry,
        host.as_ref().map(|h| h as &dyn RepositoryHost),
        &progress,
    )
    .await?;

    print_summary(&summary);
    Ok(summary)
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn print_summary(summary: &IntakeSummary) {
    let total = summary.outcomes.len();
    println!();
    println!(
        "{} {} proposal{}: {} published, {} draft, {} under review",
        "Processed".emphasis(),
        total,
        plural(total),
        summary.count(ResolvedStatus::Published),
        summary.count(ResolvedStatus::Draft),
        summary.count(ResolvedStatus::UnderReview),
    );

    let failed = summary.failures().count();
    if failed > 0 {
        println!(
            "{}",
            format!("{failed} proposal{} could not be processed", plural(failed)).failure()
        );
    }
}
