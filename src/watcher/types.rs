//! Issue watcher types and errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fields of a GitHub issue the watcher cares about.
///
/// Everything but `number` is optional so that trimmed-down payloads still
/// decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueSummary {
    pub number: u64,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// API URL of the owning repository, e.g. `https://api.github.com/repos/o/r`.
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub labels: Vec<LabelRef>,
    /// Present on pull requests, which the issues endpoint also lists.
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
}

impl IssueSummary {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request
            .as_ref()
            .is_some_and(|pr| pr.url.is_some())
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabelRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestRef {
    #[serde(default)]
    pub url: Option<String>,
}

/// What changed about an issue since the previous poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueChange {
    /// First time this issue number is seen.
    New(IssueSummary),
    /// Seen before with a different `updated_at`.
    Modified(IssueSummary),
}

impl IssueChange {
    pub fn issue(&self) -> &IssueSummary {
        match self {
            IssueChange::New(issue) | IssueChange::Modified(issue) => issue,
        }
    }
}

/// A label the inspector wants added to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddLabelRequest {
    /// Repository API URL the issue path is appended to.
    pub url: String,
    pub number: u64,
    pub label: String,
}

/// Errors raised while polling or labeling.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to poll source: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("expected a JSON array of issues, got {0}")]
    NotAnArray(&'static str),
}

/// Result type for watcher operations.
pub type WatchResult<T> = Result<T, WatchError>;
