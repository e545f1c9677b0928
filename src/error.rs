//! Error types for proposal intake

use thiserror::Error;

/// Errors that can occur while evaluating or publishing proposals
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid run-time configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Front-matter block missing or not a mapping
    #[error("malformed metadata: {0}")]
    MalformedMetadata(String),

    /// Registry answered with an unexpected status
    #[error("registry returned {status} for {endpoint}")]
    RegistryStatus {
        /// Endpoint path that was called
        endpoint: String,
        /// HTTP status code
        status: u16,
    },

    /// Registry refused a submission
    #[error("submission rejected ({status}): {message}")]
    Submission {
        /// HTTP status code
        status: u16,
        /// Message returned by the registry
        message: String,
    },

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Parse error (URLs, identifiers, responses)
    #[error("parse error: {0}")]
    Parse(String),

    /// Internal invariant violated
    #[error("internal error: {0}")]
    Internal(String),

    /// HTTP transport error
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Octocrab error
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for proposal intake operations
pub type Result<T> = std::result::Result<T, Error>;
