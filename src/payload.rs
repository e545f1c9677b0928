//! Outbound submission payload

use crate::document::{ProposalFields, Stages};
use crate::status::Resolution;
use crate::types::{ModerationMetadata, ResolvedStatus, SourceRevision};
use serde::Serialize;

/// Body sent to the registry's submit endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    /// Title
    pub title: Option<String>,
    /// Tagline
    pub tagline: Option<String>,
    /// Requested funding amount, as written
    pub funds_requested: Option<String>,
    /// Skills needed
    pub skills: Vec<String>,
    /// Sponsor question answered `Yes`
    pub organization_willing_to_sponsor: bool,
    /// Existing project question answered `Yes`
    pub existing_oss_project: bool,
    /// Author handle
    pub author: Option<String>,
    /// Project description
    pub description: String,
    /// Project details & specifications
    pub details: String,
    /// Phase texts keyed by label
    pub project_stages: Stages,
    /// Supporting information
    pub extra_information: String,
    /// Repository the proposal lives in
    pub github_url: String,
    /// Commit the proposal was read at
    pub commit_id: String,
    /// Identifier of an existing proposal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal_id: Option<String>,
    /// Resolved publish status
    pub status: ResolvedStatus,
    /// Moderation records and retry counter
    pub moderation: ModerationMetadata,
}

fn answer_is_yes(answer: Option<&str>) -> bool {
    answer == Some("Yes")
}

/// Build the submission payload for an evaluated proposal
///
/// The retry counter in `moderation` is replaced with the one from
/// `resolution`.
pub fn assemble_payload(
    fields: &ProposalFields,
    resolution: &Resolution,
    moderation: &ModerationMetadata,
    revision: &SourceRevision,
) -> SubmissionPayload {
    SubmissionPayload {
        title: fields.title.clone(),
        tagline: fields.tagline.clone(),
        funds_requested: fields.funding_amount.clone(),
        skills: fields.skills.clone(),
        organization_willing_to_sponsor: answer_is_yes(fields.sponsor_answer.as_deref()),
        existing_oss_project: answer_is_yes(fields.existing_project_answer.as_deref()),
        author: fields.author_handle(),
        description: fields.description.clone(),
        details: fields.details.clone(),
        project_stages: fields.stages.clone(),
        extra_information: fields.supporting_info.clone(),
        github_url: revision.repository_url.clone(),
        commit_id: revision.commit_id.clone(),
        proposal_id: fields.proposal_id.clone(),
        status: resolution.status,
        moderation: ModerationMetadata {
            retry: resolution.retry,
            ..moderation.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ModeratedField, ModerationRecord, RetryCounter};

    fn revision() -> SourceRevision {
        SourceRevision {
            repository_url: "https://github.com/acme/proposals".to_string(),
            branch: "main".to_string(),
            commit_id: "abc123".to_string(),
        }
    }

    #[test]
    fn test_assemble_payload_maps_fields() {
        let fields = ProposalFields {
            title: Some("Add Widget".to_string()),
            funding_amount: Some("5000".to_string()),
            sponsor_answer: Some("Yes".to_string()),
            existing_project_answer: Some("No".to_string()),
            author: Some("@alice".to_string()),
            stages: [("Phase 1", "design")].into_iter().collect(),
            ..ProposalFields::default()
        };
        let mut moderation = ModerationMetadata::with_retry(RetryCounter::new(1));
        moderation.set(ModeratedField::Title, ModerationRecord { passed: true });
        let resolution = Resolution {
            status: ResolvedStatus::Published,
            retry: RetryCounter::reset(),
        };

        let payload = assemble_payload(&fields, &resolution, &moderation, &revision());
        assert!(payload.organization_willing_to_sponsor);
        assert!(!payload.existing_oss_project);
        assert_eq!(payload.author.as_deref(), Some("alice"));
        assert_eq!(payload.moderation.retry, RetryCounter::reset());
        assert_eq!(payload.moderation.title, Some(ModerationRecord { passed: true }));

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["status"], "published");
        assert_eq!(json["funds_requested"], "5000");
        assert_eq!(json["project_stages"]["Phase 1"], "design");
        assert_eq!(json["github_url"], "https://github.com/acme/proposals");
        assert!(json.get("proposal_id").is_none());
    }

    #[test]
    fn test_assemble_payload_keeps_proposal_id() {
        let fields = ProposalFields {
            proposal_id: Some("17".to_string()),
            ..ProposalFields::default()
        };
        let resolution = Resolution {
            status: ResolvedStatus::Draft,
            retry: RetryCounter::new(1),
        };
        let payload =
            assemble_payload(&fields, &resolution, &ModerationMetadata::default(), &revision());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["proposal_id"], "17");
        assert_eq!(json["status"], "draft");
        assert_eq!(json["moderation"]["retry"], 1);
    }
}
