//! GitHub repository host using octocrab

use crate::error::{Error, Result};
use crate::host::RepositoryHost;
use crate::types::RepositoryDetails;
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// GitHub repository host
pub struct GitHubHost {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubHost {
    /// Create a host for `owner/repo`, optionally on a GitHub Enterprise host
    pub fn new(token: &str, owner: String, repo: String, host: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(h) = host {
            let base_url = format!("https://{h}/api/v3");
            builder = builder
                .base_uri(&base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            owner,
            repo,
        })
    }

    /// `owner/repo` slug
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[async_trait]
impl RepositoryHost for GitHubHost {
    async fn repository_details(&self) -> Result<RepositoryDetails> {
        debug!(repo = %self.slug(), "fetching repository details");
        let repo = self.client.repos(&self.owner, &self.repo).get().await?;

        let html_url = repo
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .ok_or_else(|| Error::GitHubApi("repository has no html_url".to_string()))?;
        let default_branch = repo
            .default_branch
            .clone()
            .ok_or_else(|| Error::GitHubApi("repository has no default branch".to_string()))?;

        debug!(
            html_url = %html_url,
            default_branch = %default_branch,
            "fetched repository details"
        );
        Ok(RepositoryDetails {
            html_url,
            default_branch,
        })
    }

    async fn latest_commit(&self, branch: &str) -> Result<String> {
        debug!(branch, "fetching latest commit");
        let page = self
            .client
            .repos(&self.owner, &self.repo)
            .list_commits()
            .sha(branch)
            .per_page(1u8)
            .send()
            .await?;

        let sha = page
            .items
            .into_iter()
            .next()
            .map(|c| c.sha)
            .ok_or_else(|| Error::GitHubApi(format!("branch {branch} has no commits")))?;
        debug!(branch, sha = %sha, "fetched latest commit");
        Ok(sha)
    }

    async fn commit_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        branch: &str,
    ) -> Result<()> {
        debug!(path, branch, "committing file");
        let repos = self.client.repos(&self.owner, &self.repo);

        // The contents API needs the blob sha of the version being replaced
        let existing = repos
            .get_content()
            .path(path)
            .r#ref(branch)
            .send()
            .await?;
        let sha = existing
            .items
            .into_iter()
            .next()
            .map(|item| item.sha)
            .ok_or_else(|| Error::GitHubApi(format!("{path} not found on {branch}")))?;

        repos
            .update_file(path, message, content, sha)
            .branch(branch)
            .send()
            .await?;
        debug!(path, branch, "committed file");
        Ok(())
    }
}
