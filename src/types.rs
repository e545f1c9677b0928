//! Core types shared by the intake engine

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::document::Stages;

/// Retry count at which a failing moderation cycle escalates to manual review
pub const ESCALATION_THRESHOLD: u32 = 2;

/// A field whose text is screened by the moderation service
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModeratedField {
    /// Proposal title
    Title,
    /// Tagline
    Tagline,
    /// Project description section
    Description,
    /// Project details & specifications section
    Details,
    /// A single phase of the stages section, keyed by its label
    Phase(String),
    /// Supporting information section
    SupportingInfo,
}

impl ModeratedField {
    /// Shorthand for a phase field
    pub fn phase(label: impl Into<String>) -> Self {
        Self::Phase(label.into())
    }
}

impl fmt::Display for ModeratedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "Title"),
            Self::Tagline => write!(f, "Tagline"),
            Self::Description => write!(f, "Project description"),
            Self::Details => write!(f, "Project details & specification"),
            Self::Phase(label) => write!(f, "{label}"),
            Self::SupportingInfo => write!(f, "Supporting information"),
        }
    }
}

/// Consecutive failing moderation cycles for one proposal
///
/// Moves through `0 → 1 → 2+` while moderation keeps failing and drops back
/// to 0 once the proposal publishes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RetryCounter(u32);

impl RetryCounter {
    /// Counter starting at `value`
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Current count
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Counter after one more failing cycle
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Counter after a successful publish
    #[must_use]
    pub const fn reset() -> Self {
        Self(0)
    }

    /// Whether enough failing cycles have accumulated to need manual review
    pub const fn is_escalated(self) -> bool {
        self.0 >= ESCALATION_THRESHOLD
    }
}

impl fmt::Display for RetryCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Moderation outcome for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationRecord {
    /// Whether the moderation service accepted the text
    pub passed: bool,
}

/// Per-field moderation records plus the proposal's retry counter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationMetadata {
    /// Title record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<ModerationRecord>,
    /// Tagline record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<ModerationRecord>,
    /// Description record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ModerationRecord>,
    /// Details record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ModerationRecord>,
    /// Phase records keyed by phase label
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stages: BTreeMap<String, ModerationRecord>,
    /// Supporting information record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supporting_info: Option<ModerationRecord>,
    /// Consecutive failing moderation cycles
    #[serde(default, deserialize_with = "retry_or_zero")]
    pub retry: RetryCounter,
}

impl ModerationMetadata {
    /// Metadata with no records and the given retry counter
    pub fn with_retry(retry: RetryCounter) -> Self {
        Self {
            retry,
            ..Self::default()
        }
    }

    /// Record stored for `field`, if any
    pub fn record(&self, field: &ModeratedField) -> Option<ModerationRecord> {
        match field {
            ModeratedField::Title => self.title,
            ModeratedField::Tagline => self.tagline,
            ModeratedField::Description => self.description,
            ModeratedField::Details => self.details,
            ModeratedField::Phase(label) => self.stages.get(label).copied(),
            ModeratedField::SupportingInfo => self.supporting_info,
        }
    }

    /// Store the record for `field`, replacing any previous one
    pub fn set(&mut self, field: ModeratedField, record: ModerationRecord) {
        match field {
            ModeratedField::Title => self.title = Some(record),
            ModeratedField::Tagline => self.tagline = Some(record),
            ModeratedField::Description => self.description = Some(record),
            ModeratedField::Details => self.details = Some(record),
            ModeratedField::Phase(label) => {
                self.stages.insert(label, record);
            }
            ModeratedField::SupportingInfo => self.supporting_info = Some(record),
        }
    }
}

// Older registry records store `"retry": null` for proposals that never failed.
fn retry_or_zero<'de, D>(deserializer: D) -> std::result::Result<RetryCounter, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RetryCounter>::deserialize(deserializer)?.unwrap_or_default())
}

/// Previously accepted state of a proposal, as stored by the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PriorProposalSnapshot {
    /// Accepted title
    #[serde(default)]
    pub title: Option<String>,
    /// Accepted tagline
    #[serde(default)]
    pub tagline: Option<String>,
    /// Accepted description
    #[serde(default)]
    pub description: Option<String>,
    /// Accepted details
    #[serde(default)]
    pub details: Option<String>,
    /// Accepted phase texts
    #[serde(default, rename = "project_stages")]
    pub stages: Stages,
    /// Accepted supporting information
    #[serde(default, rename = "extra_information")]
    pub supporting_info: Option<String>,
    /// Moderation state recorded with the accepted version
    #[serde(default)]
    pub moderation: ModerationMetadata,
}

impl PriorProposalSnapshot {
    /// Stored text for `field`; empty when the registry kept nothing
    pub fn text_of(&self, field: &ModeratedField) -> &str {
        match field {
            ModeratedField::Title => self.title.as_deref().unwrap_or_default(),
            ModeratedField::Tagline => self.tagline.as_deref().unwrap_or_default(),
            ModeratedField::Description => self.description.as_deref().unwrap_or_default(),
            ModeratedField::Details => self.details.as_deref().unwrap_or_default(),
            ModeratedField::Phase(label) => self.stages.get(label).unwrap_or_default(),
            ModeratedField::SupportingInfo => self.supporting_info.as_deref().unwrap_or_default(),
        }
    }
}

/// Publish status computed for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedStatus {
    /// Something still needs fixing by the author
    Draft,
    /// Moderation kept failing; a human has to look at it
    UnderReview,
    /// Every check passed
    Published,
}

impl fmt::Display for ResolvedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "Draft"),
            Self::UnderReview => write!(f, "Under review"),
            Self::Published => write!(f, "Published"),
        }
    }
}

/// Registry answer to a submission
///
/// The identifier may arrive as `assigned_id`, `proposal_id` or `id`; the
/// first present one wins, in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "ReceiptBody")]
pub struct SubmissionReceipt {
    /// Status string reported by the registry
    pub status: String,
    /// Human readable message
    pub message: String,
    /// Identifier assigned to a new proposal
    pub assigned_id: Option<String>,
}

#[derive(Deserialize)]
struct ReceiptBody {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default, deserialize_with = "string_or_number")]
    assigned_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    proposal_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    id: Option<String>,
}

impl From<ReceiptBody> for SubmissionReceipt {
    fn from(body: ReceiptBody) -> Self {
        Self {
            status: body.status,
            message: body.message,
            assigned_id: body.assigned_id.or(body.proposal_id).or(body.id),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Where the proposals live on the repository host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDetails {
    /// Browser URL of the repository
    pub html_url: String,
    /// Branch proposals are read from and written back to
    pub default_branch: String,
}

/// Repository revision the proposals were read at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRevision {
    /// Browser URL of the repository
    pub repository_url: String,
    /// Branch the revision belongs to
    pub branch: String,
    /// Commit identifier
    pub commit_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_counter_escalates_at_threshold() {
        let retry = RetryCounter::default();
        assert!(!retry.is_escalated());
        assert!(!retry.incremented().is_escalated());
        assert!(retry.incremented().incremented().is_escalated());
        assert_eq!(RetryCounter::reset().value(), 0);
    }

    #[test]
    fn test_retry_counter_saturates() {
        let retry = RetryCounter::new(u32::MAX);
        assert_eq!(retry.incremented().value(), u32::MAX);
    }

    #[test]
    fn test_moderation_metadata_round_trips_phase_records() {
        let mut metadata = ModerationMetadata::with_retry(RetryCounter::new(1));
        metadata.set(ModeratedField::Title, ModerationRecord { passed: true });
        metadata.set(ModeratedField::phase("Phase 2"), ModerationRecord { passed: false });

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["title"]["passed"], true);
        assert_eq!(json["stages"]["Phase 2"]["passed"], false);
        assert_eq!(json["retry"], 1);
        assert!(json.get("tagline").is_none());

        let back: ModerationMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(back, metadata);
    }

    #[test]
    fn test_moderation_metadata_accepts_null_retry() {
        let metadata: ModerationMetadata =
            serde_json::from_str(r#"{"title": {"passed": true}, "retry": null}"#).unwrap();
        assert_eq!(metadata.retry, RetryCounter::default());
        assert_eq!(
            metadata.record(&ModeratedField::Title),
            Some(ModerationRecord { passed: true })
        );
    }

    #[test]
    fn test_snapshot_reads_registry_field_names() {
        let snapshot: PriorProposalSnapshot = serde_json::from_str(
            r#"{
                "title": "Add Widget",
                "tagline": null,
                "project_stages": {"Phase 1": "first"},
                "extra_information": "links",
                "moderation": {"retry": 2}
            }"#,
        )
        .unwrap();
        assert_eq!(snapshot.text_of(&ModeratedField::Title), "Add Widget");
        assert_eq!(snapshot.text_of(&ModeratedField::Tagline), "");
        assert_eq!(snapshot.text_of(&ModeratedField::phase("Phase 1")), "first");
        assert_eq!(snapshot.text_of(&ModeratedField::SupportingInfo), "links");
        assert_eq!(snapshot.moderation.retry.value(), 2);
    }

    #[test]
    fn test_receipt_accepts_numeric_identifier() {
        let receipt: SubmissionReceipt =
            serde_json::from_str(r#"{"status": "ok", "message": "created", "proposal_id": 42}"#)
                .unwrap();
        assert_eq!(receipt.assigned_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_receipt_with_several_identifier_fields() {
        let receipt: SubmissionReceipt =
            serde_json::from_str(r#"{"id": 7, "proposal_id": "42", "status": "created"}"#)
                .unwrap();
        assert_eq!(receipt.assigned_id.as_deref(), Some("42"));
        assert_eq!(receipt.status, "created");
        assert!(receipt.message.is_empty());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(ResolvedStatus::UnderReview).unwrap(),
            "under_review"
        );
    }
}
