//! Error types for renovate-triage

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the triage engine and its collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub API returned an error or could not be reached
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Raw octocrab error
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Generic platform failure (used by batch reporting and mocks)
    #[error("platform error: {0}")]
    Platform(String),

    /// No usable authentication
    #[error("authentication error: {0}")]
    Auth(String),

    /// A cluster query failed (non-zero exit or spawn failure)
    #[error("cluster command `{command}` failed: {message}")]
    Cluster {
        /// The command that was run
        command: String,
        /// stderr or spawn error text
        message: String,
    },

    /// Structured output could not be parsed
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// Merge rejected because the base branch moved underneath it
    #[error("PR #{number} conflicts with its base branch: {message}")]
    MergeConflict {
        /// PR number
        number: u64,
        /// Message returned by the platform
        message: String,
    },

    /// Operator entered something the menu does not understand
    #[error("{0}")]
    InvalidSelection(String),

    /// Configuration value could not be used
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether retrying the same merge call may succeed
    pub const fn is_merge_conflict(&self) -> bool {
        matches!(self, Self::MergeConflict { .. })
    }
}
