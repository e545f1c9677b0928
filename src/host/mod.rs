//! Repository host services
//!
//! The repository host knows where the proposals live and persists identifier
//! write-backs. GitHub is the only host implemented.

mod github;

pub use github::GitHubHost;

use crate::error::Result;
use crate::types::{RepositoryDetails, SourceRevision};
use async_trait::async_trait;

/// Repository host trait
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Browser URL and default branch of the repository
    async fn repository_details(&self) -> Result<RepositoryDetails>;

    /// Newest commit on `branch`
    async fn latest_commit(&self, branch: &str) -> Result<String>;

    /// Replace the content of an existing file on `branch`
    async fn commit_file(&self, path: &str, content: &str, message: &str, branch: &str)
    -> Result<()>;

    /// Repository URL, branch and commit the current run reads from
    async fn source_revision(&self) -> Result<SourceRevision> {
        let details = self.repository_details().await?;
        let commit_id = self.latest_commit(&details.default_branch).await?;
        Ok(SourceRevision {
            repository_url: details.html_url,
            branch: details.default_branch,
            commit_id,
        })
    }
}
