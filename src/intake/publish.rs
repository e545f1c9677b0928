//! Publication phase: submit payloads and write assigned identifiers back

use crate::document::insert_proposal_id;
use crate::error::Result;
use crate::host::RepositoryHost;
use crate::intake::progress::ProgressCallback;
use crate::intake::{EvaluatedProposal, Publication};
use crate::registry::RegistryService;
use crate::types::SourceRevision;
use tracing::{debug, info, warn};

/// Commit message used when an assigned identifier is written back
pub fn assignment_message(proposal_id: &str, repo_path: &str) -> String {
    format!("Assign proposal ID {proposal_id} to {repo_path}")
}

/// Submit one evaluated proposal and persist a newly assigned identifier
///
/// Errors are reported through `progress` and recorded in the returned
/// [`Publication`]; they never stop the remaining proposals.
pub async fn publish_proposal(
    proposal: &EvaluatedProposal,
    registry: &dyn RegistryService,
    host: &dyn RepositoryHost,
    revision: &SourceRevision,
    progress: &dyn ProgressCallback,
) -> Publication {
    let payload = proposal.evaluation.payload(revision);
    let receipt = match registry.submit_proposal(&payload).await {
        Ok(receipt) => receipt,
        Err(e) => {
            warn!(path = %proposal.source.repo_path, error = %e, "submission failed");
            progress.on_error(&proposal.source, &e).await;
            return Publication::Failed(e.to_string());
        }
    };
    progress.on_submitted(&proposal.source, &receipt).await;
    info!(path = %proposal.source.repo_path, status = %payload.status, "proposal submitted");

    let assigned_id = match (proposal.evaluation.is_new(), receipt.assigned_id) {
        (true, Some(id)) => id,
        (_, assigned_id) => return Publication::Submitted { assigned_id },
    };

    match write_back(proposal, host, revision, &assigned_id).await {
        Ok(()) => {
            progress.on_written_back(&proposal.source, &assigned_id).await;
            Publication::Submitted {
                assigned_id: Some(assigned_id),
            }
        }
        Err(e) => {
            warn!(path = %proposal.source.repo_path, error = %e, "identifier write-back failed");
            progress.on_error(&proposal.source, &e).await;
            Publication::WriteBackFailed {
                assigned_id,
                error: e.to_string(),
            }
        }
    }
}

async fn write_back(
    proposal: &EvaluatedProposal,
    host: &dyn RepositoryHost,
    revision: &SourceRevision,
    proposal_id: &str,
) -> Result<()> {
    let path = &proposal.source.repo_path;
    let updated = insert_proposal_id(&proposal.document.text, proposal_id);
    debug!(path = %path, proposal_id, "writing assigned identifier");
    host.commit_file(
        path,
        &updated,
        &assignment_message(proposal_id, path),
        &revision.branch,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_message() {
        assert_eq!(
            assignment_message("42", "proposals/widget.md"),
            "Assign proposal ID 42 to proposals/widget.md"
        );
    }
}
