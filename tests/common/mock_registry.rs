//! In-memory registry service for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use proposal_intake::error::{Error, Result};
use proposal_intake::payload::SubmissionPayload;
use proposal_intake::registry::RegistryService;
use proposal_intake::types::{PriorProposalSnapshot, SubmissionReceipt};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Registry that keeps submitted proposals in memory
///
/// Accepted submissions become the prior snapshot returned for their
/// identifier on later runs, so a sequence of runs behaves like the real
/// registry.
#[derive(Default)]
pub struct MockRegistry {
    taken_titles: Mutex<HashSet<String>>,
    unknown_authors: Mutex<HashSet<String>>,
    rejected_markers: Mutex<Vec<String>>,
    unreachable_markers: Mutex<Vec<String>>,
    failing_titles: Mutex<HashSet<String>>,
    unavailable: Mutex<bool>,
    snapshots: Mutex<HashMap<String, PriorProposalSnapshot>>,
    next_id: Mutex<u32>,
    moderation_calls: Mutex<Vec<String>>,
    submissions: Mutex<Vec<SubmissionPayload>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self {
            next_id: Mutex::new(100),
            ..Self::default()
        }
    }

    /// Mark `title` as already used by another proposal
    pub fn take_title(&self, title: &str) {
        self.taken_titles.lock().unwrap().insert(title.to_string());
    }

    /// Report `handle` as not registered
    pub fn forget_author(&self, handle: &str) {
        self.unknown_authors.lock().unwrap().insert(handle.to_string());
    }

    /// Reject any moderated text containing `marker`
    pub fn reject_text_containing(&self, marker: &str) {
        self.rejected_markers.lock().unwrap().push(marker.to_string());
    }

    /// Fail the moderation request for any text containing `marker`
    pub fn fail_moderation_containing(&self, marker: &str) {
        self.unreachable_markers
            .lock()
            .unwrap()
            .push(marker.to_string());
    }

    /// Stop rejecting texts
    pub fn accept_all_text(&self) {
        self.rejected_markers.lock().unwrap().clear();
    }

    /// Refuse submissions of proposals titled `title`
    pub fn fail_submission_for(&self, title: &str) {
        self.failing_titles.lock().unwrap().insert(title.to_string());
    }

    /// Answer every lookup with a server error
    pub fn go_down(&self) {
        *self.unavailable.lock().unwrap() = true;
    }

    fn check_available(&self, endpoint: &str) -> Result<()> {
        if *self.unavailable.lock().unwrap() {
            return Err(Error::RegistryStatus {
                endpoint: endpoint.to_string(),
                status: 503,
            });
        }
        Ok(())
    }

    /// Store a prior snapshot for `proposal_id`
    pub fn insert_snapshot(&self, proposal_id: &str, snapshot: PriorProposalSnapshot) {
        self.snapshots
            .lock()
            .unwrap()
            .insert(proposal_id.to_string(), snapshot);
    }

    pub fn snapshot(&self, proposal_id: &str) -> Option<PriorProposalSnapshot> {
        self.snapshots.lock().unwrap().get(proposal_id).cloned()
    }

    pub fn moderation_calls(&self) -> Vec<String> {
        self.moderation_calls.lock().unwrap().clone()
    }

    pub fn clear_moderation_calls(&self) {
        self.moderation_calls.lock().unwrap().clear();
    }

    pub fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistryService for MockRegistry {
    async fn lookup_title_unique(&self, title: &str) -> Result<bool> {
        self.check_available("check_title")?;
        Ok(!self.taken_titles.lock().unwrap().contains(title))
    }

    async fn lookup_author_exists(&self, handle: &str) -> Result<bool> {
        self.check_available("check_username")?;
        Ok(!self.unknown_authors.lock().unwrap().contains(handle))
    }

    async fn lookup_prior_proposal(
        &self,
        proposal_id: &str,
    ) -> Result<Option<PriorProposalSnapshot>> {
        Ok(self.snapshot(proposal_id))
    }

    async fn check_moderation(&self, text: &str) -> Result<bool> {
        self.moderation_calls.lock().unwrap().push(text.to_string());
        let unreachable = self
            .unreachable_markers
            .lock()
            .unwrap()
            .iter()
            .any(|marker| text.contains(marker.as_str()));
        if unreachable {
            return Err(Error::Internal("moderation service unreachable".to_string()));
        }
        let rejected = self
            .rejected_markers
            .lock()
            .unwrap()
            .iter()
            .any(|marker| text.contains(marker.as_str()));
        Ok(!rejected)
    }

    async fn submit_proposal(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt> {
        self.submissions.lock().unwrap().push(payload.clone());

        let failing = payload
            .title
            .as_ref()
            .is_some_and(|t| self.failing_titles.lock().unwrap().contains(t));
        if failing {
            return Err(Error::Submission {
                status: 500,
                message: "registry unavailable".to_string(),
            });
        }

        let (proposal_id, assigned_id) = match &payload.proposal_id {
            Some(id) => (id.clone(), None),
            None => {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                (next.to_string(), Some(next.to_string()))
            }
        };

        // The registry stores what it was sent; later runs diff against it
        let stored: PriorProposalSnapshot =
            serde_json::from_value(serde_json::to_value(payload)?)?;
        self.insert_snapshot(&proposal_id, stored);

        Ok(SubmissionReceipt {
            status: "created".to_string(),
            message: String::new(),
            assigned_id,
        })
    }
}
