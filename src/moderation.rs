//! Diff-aware content moderation
//!
//! Every present moderated field is screened by the registry's moderation
//! endpoint unless the registry already accepted exactly this text for this
//! proposal. Re-submitting an unchanged, previously approved field never
//! reaches the moderation service.

use crate::checklist::{Checklist, RuleId};
use crate::document::ProposalFields;
use crate::registry::RegistryService;
use crate::types::{ModeratedField, ModerationMetadata, ModerationRecord, PriorProposalSnapshot};
use tracing::{debug, info, warn};

/// Result of a moderation pass over one proposal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModerationOutcome {
    /// One moderation entry per present field
    pub checklist: Checklist,
    /// Per-field records, retry carried over from the prior snapshot
    pub metadata: ModerationMetadata,
    /// Number of requests sent to the moderation service
    pub requests: usize,
}

/// Whether `field` has to be sent to the moderation service
///
/// A new proposal (no identifier) is always screened. A known proposal is
/// screened when there is no accepted snapshot to compare against, when the
/// text changed, or when the last recorded moderation for the field failed.
pub fn needs_moderation(
    field: &ModeratedField,
    text: &str,
    proposal_id: Option<&str>,
    prior: Option<&PriorProposalSnapshot>,
) -> bool {
    if proposal_id.is_none() {
        return true;
    }
    let Some(prior) = prior else {
        return true;
    };
    if prior.text_of(field).trim() != text {
        return true;
    }
    prior
        .moderation
        .record(field)
        .is_none_or(|record| !record.passed)
}

/// Run moderation for every present field of a proposal
///
/// Transport errors are logged and count as a rejection for that field; they
/// never abort the run.
pub async fn moderate_fields(
    fields: &ProposalFields,
    prior: Option<&PriorProposalSnapshot>,
    registry: &dyn RegistryService,
) -> ModerationOutcome {
    let retry = prior.map(|p| p.moderation.retry).unwrap_or_default();
    let mut outcome = ModerationOutcome {
        metadata: ModerationMetadata::with_retry(retry),
        ..ModerationOutcome::default()
    };

    for field in fields.moderated_fields() {
        let Some(text) = fields.text_of(&field) else {
            continue;
        };

        let passed = if needs_moderation(&field, text, fields.proposal_id.as_deref(), prior) {
            outcome.requests += 1;
            request_moderation(&field, text, registry).await
        } else {
            debug!(field = %field, "unchanged and previously accepted, skipping moderation");
            true
        };

        outcome
            .checklist
            .set(RuleId::Moderation(field.clone()), passed);
        outcome.metadata.set(field, ModerationRecord { passed });
    }

    outcome
}

async fn request_moderation(
    field: &ModeratedField,
    text: &str,
    registry: &dyn RegistryService,
) -> bool {
    debug!(field = %field, chars = text.chars().count(), "requesting moderation");
    match registry.check_moderation(text).await {
        Ok(true) => true,
        Ok(false) => {
            info!(field = %field, "moderation rejected content");
            false
        }
        Err(e) => {
            warn!(field = %field, error = %e, "moderation request failed, counting as rejected");
            false
        }
    }
}
