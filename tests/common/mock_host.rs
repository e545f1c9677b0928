//! In-memory repository host for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use proposal_intake::error::{Error, Result};
use proposal_intake::host::RepositoryHost;
use proposal_intake::types::RepositoryDetails;
use std::path::PathBuf;
use std::sync::Mutex;

/// A file committed through the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedFile {
    pub path: String,
    pub content: String,
    pub message: String,
    pub branch: String,
}

/// Repository host that records commits instead of sending them
///
/// With a worktree, committed content is also written to disk so the next run
/// reads it, as a fresh checkout would.
pub struct MockHost {
    pub html_url: String,
    pub branch: String,
    pub commit_id: String,
    worktree: Option<PathBuf>,
    fail_commits: Mutex<bool>,
    commits: Mutex<Vec<CommittedFile>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            html_url: "https://github.com/acme/proposals".to_string(),
            branch: "main".to_string(),
            commit_id: "0123abcd".to_string(),
            worktree: None,
            fail_commits: Mutex::new(false),
            commits: Mutex::new(Vec::new()),
        }
    }

    pub fn with_worktree(root: impl Into<PathBuf>) -> Self {
        Self {
            worktree: Some(root.into()),
            ..Self::new()
        }
    }

    pub fn fail_commits(&self) {
        *self.fail_commits.lock().unwrap() = true;
    }

    pub fn commits(&self) -> Vec<CommittedFile> {
        self.commits.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepositoryHost for MockHost {
    async fn repository_details(&self) -> Result<RepositoryDetails> {
        Ok(RepositoryDetails {
            html_url: self.html_url.clone(),
            default_branch: self.branch.clone(),
        })
    }

    async fn latest_commit(&self, branch: &str) -> Result<String> {
        if branch != self.branch {
            return Err(Error::GitHubApi(format!("unknown branch {branch}")));
        }
        Ok(self.commit_id.clone())
    }

    async fn commit_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        branch: &str,
    ) -> Result<()> {
        if *self.fail_commits.lock().unwrap() {
            return Err(Error::GitHubApi("commit rejected".to_string()));
        }
        if let Some(root) = &self.worktree {
            std::fs::write(root.join(path), content)?;
        }
        self.commits.lock().unwrap().push(CommittedFile {
            path: path.to_string(),
            content: content.to_string(),
            message: message.to_string(),
            branch: branch.to_string(),
        });
        Ok(())
    }
}
