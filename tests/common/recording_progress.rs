//! Progress callback that keeps what it was told

#![allow(dead_code)]

use async_trait::async_trait;
use proposal_intake::checklist::Checklist;
use proposal_intake::error::Error;
use proposal_intake::intake::{Phase, ProgressCallback, ProposalEvaluation, ProposalSource};
use proposal_intake::types::SubmissionReceipt;
use std::sync::Mutex;

/// Records phases, per-proposal checklists and errors
#[derive(Default)]
pub struct RecordingProgress {
    phases: Mutex<Vec<Phase>>,
    checklists: Mutex<Vec<(String, Checklist)>>,
    errors: Mutex<Vec<(String, String)>>,
}

impl RecordingProgress {
    pub fn phases(&self) -> Vec<Phase> {
        self.phases.lock().unwrap().clone()
    }

    /// Checklist reported for `repo_path`
    pub fn checklist(&self, repo_path: &str) -> Checklist {
        self.checklists
            .lock()
            .unwrap()
            .iter()
            .find(|(path, _)| path == repo_path)
            .map(|(_, checklist)| checklist.clone())
            .unwrap_or_else(|| panic!("no checklist reported for {repo_path}"))
    }

    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_phase(&self, phase: Phase) {
        self.phases.lock().unwrap().push(phase);
    }

    async fn on_evaluated(&self, source: &ProposalSource, evaluation: &ProposalEvaluation) {
        self.checklists
            .lock()
            .unwrap()
            .push((source.repo_path.clone(), evaluation.checklist.clone()));
    }

    async fn on_submitted(&self, _source: &ProposalSource, _receipt: &SubmissionReceipt) {}

    async fn on_written_back(&self, _source: &ProposalSource, _proposal_id: &str) {}

    async fn on_error(&self, source: &ProposalSource, error: &Error) {
        self.errors
            .lock()
            .unwrap()
            .push((source.repo_path.clone(), error.to_string()));
    }

    async fn on_message(&self, _message: &str) {}
}
