//! Proposal file discovery

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A proposal file found in the working tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalSource {
    /// Location on disk
    pub path: PathBuf,
    /// Path relative to the repository root, `/` separated
    pub repo_path: String,
}

impl ProposalSource {
    /// Source for `path`, addressed as `repo_path` in the repository
    pub fn new(path: impl Into<PathBuf>, repo_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            repo_path: repo_path.into(),
        }
    }
}

fn repo_relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).map_or_else(
        |_| path.to_string_lossy().into_owned(),
        |relative| {
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        },
    )
}

/// List proposal files in `dir` (relative to `root` unless absolute)
///
/// Hidden files and subdirectories are skipped. Results are sorted by
/// repository path so runs are reproducible. A missing directory yields no
/// proposals.
pub fn discover_proposals(root: &Path, dir: &Path) -> Result<Vec<ProposalSource>> {
    let dir = root.join(dir);
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "proposals directory does not exist");
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let entry = entry?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden || !path.is_file() {
            continue;
        }
        let repo_path = repo_relative(root, &path);
        sources.push(ProposalSource { path, repo_path });
    }

    sources.sort_by(|a, b| a.repo_path.cmp(&b.repo_path));
    debug!(dir = %dir.display(), count = sources.len(), "discovered proposals");
    Ok(sources)
}
