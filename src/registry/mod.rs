//! Proposal registry service
//!
//! The registry owns accepted proposals, user accounts and the moderation
//! endpoint. The engine only talks to it through [`RegistryService`].

mod http;

pub use http::{DEFAULT_TIMEOUT_SECS, HttpRegistry};

use crate::error::Result;
use crate::payload::SubmissionPayload;
use crate::types::{PriorProposalSnapshot, SubmissionReceipt};
use async_trait::async_trait;

/// Registry service trait
///
/// Implementations must answer lookups with the registry's verdict and return
/// `Err` only for transport-level failures or unexpected server errors.
#[async_trait]
pub trait RegistryService: Send + Sync {
    /// Whether no other proposal uses `title`
    async fn lookup_title_unique(&self, title: &str) -> Result<bool>;

    /// Whether `handle` is a registered user
    async fn lookup_author_exists(&self, handle: &str) -> Result<bool>;

    /// Accepted state of the proposal with `proposal_id`, if the registry has one
    async fn lookup_prior_proposal(&self, proposal_id: &str)
    -> Result<Option<PriorProposalSnapshot>>;

    /// Whether the moderation service accepts `text`
    async fn check_moderation(&self, text: &str) -> Result<bool>;

    /// Submit a proposal payload
    async fn submit_proposal(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt>;
}
