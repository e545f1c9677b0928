//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different interfaces (CLI, CI annotations, etc.) to
//! receive progress updates while proposals are evaluated and published.

use crate::error::Error;
use crate::intake::{ProposalEvaluation, ProposalSource};
use crate::types::SubmissionReceipt;
use async_trait::async_trait;

/// Intake phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fetching repository details from the host
    Preparing,
    /// Parsing, validating and moderating proposals
    Evaluating,
    /// Submitting payloads and writing identifiers back
    Publishing,
    /// Intake complete
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preparing => write!(f, "Preparing"),
            Self::Evaluating => write!(f, "Evaluating proposals"),
            Self::Publishing => write!(f, "Publishing"),
            Self::Complete => write!(f, "Done"),
        }
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during intake.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called once a proposal's checklist and status are known
    async fn on_evaluated(&self, source: &ProposalSource, evaluation: &ProposalEvaluation);

    /// Called when the registry accepted a submission
    async fn on_submitted(&self, source: &ProposalSource, receipt: &SubmissionReceipt);

    /// Called when an assigned identifier was committed into the document
    async fn on_written_back(&self, source: &ProposalSource, proposal_id: &str);

    /// Called when an error occurs for one proposal (non-fatal)
    async fn on_error(&self, source: &ProposalSource, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_evaluated(&self, _source: &ProposalSource, _evaluation: &ProposalEvaluation) {}
    async fn on_submitted(&self, _source: &ProposalSource, _receipt: &SubmissionReceipt) {}
    async fn on_written_back(&self, _source: &ProposalSource, _proposal_id: &str) {}
    async fn on_error(&self, _source: &ProposalSource, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
