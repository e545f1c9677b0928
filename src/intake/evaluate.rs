//! Evaluation phase: checklist, moderation and status for one proposal

use crate::checklist::{Checklist, evaluate_checklist};
use crate::document::{ProposalDocument, ProposalFields};
use crate::error::Result;
use crate::moderation::moderate_fields;
use crate::payload::{SubmissionPayload, assemble_payload};
use crate::registry::RegistryService;
use crate::status::{Resolution, resolve_status};
use crate::types::{ModerationMetadata, PriorProposalSnapshot, SourceRevision};
use tracing::{debug, info};

/// Everything known about a proposal once it has been evaluated
#[derive(Debug, Clone)]
pub struct ProposalEvaluation {
    /// Fields read from the document
    pub fields: ProposalFields,
    /// Registry snapshot of the previously submitted version, if any
    pub prior: Option<PriorProposalSnapshot>,
    /// Rule and moderation results
    pub checklist: Checklist,
    /// Moderation records, retry counter already resolved
    pub moderation: ModerationMetadata,
    /// Resolved status and retry counter
    pub resolution: Resolution,
    /// Requests sent to the moderation service
    pub moderation_requests: usize,
}

impl ProposalEvaluation {
    /// Whether the proposal has no registry identifier yet
    pub const fn is_new(&self) -> bool {
        self.fields.proposal_id.is_none()
    }

    /// Submission payload for this proposal at `revision`
    pub fn payload(&self, revision: &SourceRevision) -> SubmissionPayload {
        assemble_payload(&self.fields, &self.resolution, &self.moderation, revision)
    }
}

/// Evaluate a parsed proposal against the registry
///
/// Registry lookup failures abort the evaluation; moderation transport
/// failures only fail the affected field.
pub async fn evaluate_document(
    document: &ProposalDocument,
    registry: &dyn RegistryService,
) -> Result<ProposalEvaluation> {
    let fields = document.fields();

    let prior = match fields.proposal_id.as_deref() {
        Some(id) => registry.lookup_prior_proposal(id).await?,
        None => None,
    };
    if fields.proposal_id.is_some() && prior.is_none() {
        debug!(proposal_id = ?fields.proposal_id, "no registry snapshot for known proposal");
    }

    let mut checklist = evaluate_checklist(&fields, prior.as_ref(), registry).await?;
    let outcome = moderate_fields(&fields, prior.as_ref(), registry).await;
    checklist.merge(outcome.checklist);

    let resolution = resolve_status(&checklist, outcome.metadata.retry);
    let moderation = ModerationMetadata {
        retry: resolution.retry,
        ..outcome.metadata
    };

    info!(
        title = ?fields.title,
        status = %resolution.status,
        retry = %resolution.retry,
        failures = checklist.failures().count(),
        "proposal evaluated"
    );

    Ok(ProposalEvaluation {
        fields,
        prior,
        checklist,
        moderation,
        resolution,
        moderation_requests: outcome.requests,
    })
}
