//! Shared CLI progress callback

use crate::cli::style::{Stylize, check, cross, mark};
use anstream::{eprintln, println};
use async_trait::async_trait;
use proposal_intake::error::Error;
use proposal_intake::intake::{Phase, ProgressCallback, ProposalEvaluation, ProposalSource};
use proposal_intake::types::{ResolvedStatus, SubmissionReceipt};

/// CLI progress callback that prints to stdout
///
/// Two modes:
/// - verbose: every phase and the full checklist of each proposal
/// - compact: failing checklist entries only
pub struct CliProgress {
    /// Verbose mode shows all phases and every checklist entry
    pub verbose: bool,
}

impl CliProgress {
    /// Create verbose progress
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }

    /// Create compact progress
    pub const fn compact() -> Self {
        Self { verbose: false }
    }
}

fn styled_status(status: ResolvedStatus) -> String {
    match status {
        ResolvedStatus::Published => status.success(),
        ResolvedStatus::Draft => status.warning(),
        ResolvedStatus::UnderReview => status.failure(),
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        if self.verbose {
            println!("{}", format!("{phase}...").muted());
        }
    }

    async fn on_evaluated(&self, source: &ProposalSource, evaluation: &ProposalEvaluation) {
        println!();
        println!("{}", source.repo_path.emphasis());
        for (rule, entry) in evaluation.checklist.iter() {
            if self.verbose || !entry.passed {
                println!("  {} {rule}", mark(entry.passed));
            }
        }
        let resolution = &evaluation.resolution;
        println!(
            "  {} {} {}",
            "Status:".muted(),
            styled_status(resolution.status),
            format!("(retry {})", resolution.retry).muted()
        );
    }

    async fn on_submitted(&self, source: &ProposalSource, receipt: &SubmissionReceipt) {
        match &receipt.assigned_id {
            Some(id) => println!(
                "  {} Submitted {} as proposal {}",
                check(),
                source.repo_path,
                id.accent()
            ),
            None => println!("  {} Submitted {}", check(), source.repo_path),
        }
        if self.verbose && !receipt.message.is_empty() {
            println!("    {}", receipt.message.muted());
        }
    }

    async fn on_written_back(&self, source: &ProposalSource, proposal_id: &str) {
        println!(
            "  {} Wrote proposal ID {} to {}",
            check(),
            proposal_id.accent(),
            source.repo_path
        );
    }

    async fn on_error(&self, source: &ProposalSource, error: &Error) {
        eprintln!("  {} {}: {error}", cross(), source.repo_path);
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}
