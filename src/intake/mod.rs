//! Three-phase intake engine
//!
//! Handles the workflow of turning proposal documents into registry
//! submissions:
//! 1. Discovery - find proposal files and read the source revision
//! 2. Evaluation - validate, moderate and resolve a status per proposal
//! 3. Publication - submit payloads and commit assigned identifiers
//!
//! Every step runs sequentially. Publication is skipped entirely when no
//! repository host is available (dry run).

mod discover;
mod evaluate;
mod progress;
mod publish;

pub use discover::{ProposalSource, discover_proposals};
pub use evaluate::{ProposalEvaluation, evaluate_document};
pub use progress::{NoopProgress, Phase, ProgressCallback};
pub use publish::{assignment_message, publish_proposal};

use crate::document::ProposalDocument;
use crate::error::{Error, Result};
use crate::host::RepositoryHost;
use crate::registry::RegistryService;
use crate::types::ResolvedStatus;
use tracing::{debug, info, warn};

/// A proposal that made it through evaluation
#[derive(Debug, Clone)]
pub struct EvaluatedProposal {
    /// Where the document was read from
    pub source: ProposalSource,
    /// Parsed document
    pub document: ProposalDocument,
    /// Evaluation result
    pub evaluation: ProposalEvaluation,
}

/// What happened to a proposal during publication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Publication {
    /// Nothing was sent (dry run or unreadable document)
    NotAttempted,
    /// The registry accepted the submission
    Submitted {
        /// Identifier the registry returned, if any
        assigned_id: Option<String>,
    },
    /// Submitted, but the assigned identifier could not be committed
    WriteBackFailed {
        /// Identifier the registry returned
        assigned_id: String,
        /// Write-back error
        error: String,
    },
    /// The submission failed
    Failed(String),
}

/// Per-proposal result of an intake run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalOutcome {
    /// Repository path of the proposal
    pub repo_path: String,
    /// Resolved status, `None` if the document could not be read
    pub status: Option<ResolvedStatus>,
    /// Publication result
    pub publication: Publication,
}

/// Result of an intake run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeSummary {
    /// One outcome per discovered proposal, in discovery order
    pub outcomes: Vec<ProposalOutcome>,
}

impl IntakeSummary {
    /// Number of proposals resolved to `status`
    pub fn count(&self, status: ResolvedStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == Some(status))
            .count()
    }

    /// Outcomes with a failed read, submission or write-back
    pub fn failures(&self) -> impl Iterator<Item = &ProposalOutcome> {
        self.outcomes.iter().filter(|o| {
            o.status.is_none()
                || matches!(
                    o.publication,
                    Publication::Failed(_) | Publication::WriteBackFailed { .. }
                )
        })
    }

    /// Whether every proposal was read and, if attempted, published
    pub fn success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Run intake over `sources`
///
/// With a `host`, the source revision is fetched first and any failure there
/// aborts the run. Registry lookup failures during evaluation abort the run as
/// well; unreadable files, submission and write-back failures are reported and
/// the remaining proposals are still processed.
pub async fn run_intake(
    sources: &[ProposalSource],
    registry: &dyn RegistryService,
    host: Option<&dyn RepositoryHost>,
    progress: &dyn ProgressCallback,
) -> Result<IntakeSummary> {
    let revision = match host {
        Some(host) => {
            progress.on_phase(Phase::Preparing).await;
            Some(host.source_revision().await?)
        }
        None => None,
    };

    progress.on_phase(Phase::Evaluating).await;
    let mut summary = IntakeSummary::default();
    let mut evaluated = Vec::new();
    for source in sources {
        debug!(path = %source.repo_path, "reading proposal");
        let text = match tokio::fs::read_to_string(&source.path).await {
            Ok(text) => text,
            Err(e) => {
                let err = Error::from(e);
                warn!(path = %source.repo_path, error = %err, "cannot read proposal");
                progress.on_error(source, &err).await;
                summary.outcomes.push(ProposalOutcome {
                    repo_path: source.repo_path.clone(),
                    status: None,
                    publication: Publication::NotAttempted,
                });
                continue;
            }
        };

        let document = ProposalDocument::parse(text);
        let evaluation = evaluate_document(&document, registry).await?;
        progress.on_evaluated(source, &evaluation).await;
        evaluated.push(EvaluatedProposal {
            source: source.clone(),
            document,
            evaluation,
        });
    }

    match (host, revision.as_ref()) {
        (Some(host), Some(revision)) => {
            progress.on_phase(Phase::Publishing).await;
            for proposal in &evaluated {
                let publication =
                    publish_proposal(proposal, registry, host, revision, progress).await;
                summary.outcomes.push(outcome(proposal, publication));
            }
        }
        _ => {
            progress.on_message("Dry run: nothing submitted").await;
            summary.outcomes.extend(
                evaluated
                    .iter()
                    .map(|proposal| outcome(proposal, Publication::NotAttempted)),
            );
        }
    }

    summary.outcomes.sort_by(|a, b| a.repo_path.cmp(&b.repo_path));
    progress.on_phase(Phase::Complete).await;
    info!(
        proposals = summary.outcomes.len(),
        published = summary.count(ResolvedStatus::Published),
        drafts = summary.count(ResolvedStatus::Draft),
        under_review = summary.count(ResolvedStatus::UnderReview),
        "intake finished"
    );
    Ok(summary)
}

fn outcome(proposal: &EvaluatedProposal, publication: Publication) -> ProposalOutcome {
    ProposalOutcome {
        repo_path: proposal.source.repo_path.clone(),
        status: Some(proposal.evaluation.resolution.status),
        publication,
    }
}
