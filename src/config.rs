//! Run configuration
//!
//! Values arrive from CLI arguments (which fall back to the workflow's
//! environment variables) and are validated here before any proposal is read.

use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

/// Default directory proposals are read from, relative to the repository root
pub const DEFAULT_PROPOSALS_DIR: &str = "proposals";

/// Unvalidated configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigInput {
    /// Registry base URL
    pub api_url: Option<String>,
    /// GitHub token
    pub token: Option<String>,
    /// Repository slug, `owner/repo`
    pub repository: Option<String>,
    /// Proposals directory
    pub proposals_dir: Option<PathBuf>,
    /// Repository root
    pub root: Option<PathBuf>,
    /// Evaluate only, never submit or write back
    pub dry_run: bool,
}

/// Where submissions are published and identifiers written back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    /// GitHub token
    pub token: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// GitHub Enterprise hostname, if not github.com
    pub host: Option<String>,
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Registry base URL
    pub registry_url: Url,
    /// Repository root
    pub root: PathBuf,
    /// Proposals directory, relative to `root` unless absolute
    pub proposals_dir: PathBuf,
    /// Publish target, `None` for a dry run
    pub target: Option<PublishTarget>,
}

impl Config {
    /// Validate `input`, reading the token and host from the environment when
    /// not given
    pub fn resolve(input: ConfigInput) -> Result<Self> {
        let api_url = non_empty(input.api_url)
            .ok_or_else(|| Error::Config("registry URL not set (API_URL)".to_string()))?;
        let registry_url = parse_registry_url(&api_url)?;

        let target = if input.dry_run {
            debug!("dry run, publish target not required");
            None
        } else {
            let token = non_empty(input.token)
                .or_else(token_from_env)
                .ok_or_else(|| {
                    Error::Config("GitHub token not set (GH_TOKEN or GITHUB_TOKEN)".to_string())
                })?;
            let slug = non_empty(input.repository).ok_or_else(|| {
                Error::Config("repository not set (GITHUB_REPOSITORY)".to_string())
            })?;
            let (owner, repo) = parse_repository_slug(&slug)?;
            Some(PublishTarget {
                token,
                owner,
                repo,
                host: non_empty(env::var("GH_HOST").ok()),
            })
        };

        Ok(Self {
            registry_url,
            root: input.root.unwrap_or_else(|| PathBuf::from(".")),
            proposals_dir: input
                .proposals_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROPOSALS_DIR)),
            target,
        })
    }

    /// Whether submission and write-back are skipped
    pub const fn is_dry_run(&self) -> bool {
        self.target.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the registry base URL; only http and https are accepted
pub fn parse_registry_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("invalid registry URL {raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::Config(format!(
            "unsupported registry URL scheme: {scheme}"
        ))),
    }
}

/// Split an `owner/repo` slug
pub fn parse_repository_slug(slug: &str) -> Result<(String, String)> {
    let slug = slug.trim().trim_end_matches('/');
    let (owner, repo) = slug
        .split_once('/')
        .ok_or_else(|| Error::Config(format!("repository must be owner/repo, got {slug}")))?;
    let repo = repo.trim_end_matches(".git");
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return Err(Error::Config(format!(
            "repository must be owner/repo, got {slug}"
        )));
    }
    Ok((owner.to_string(), repo.to_string()))
}

/// GitHub token from `GH_TOKEN`, falling back to `GITHUB_TOKEN`
pub fn token_from_env() -> Option<String> {
    if let Some(token) = non_empty(env::var("GH_TOKEN").ok()) {
        debug!("using token from GH_TOKEN");
        return Some(token);
    }
    if let Some(token) = non_empty(env::var("GITHUB_TOKEN").ok()) {
        debug!("using token from GITHUB_TOKEN");
        return Some(token);
    }
    None
}
