//! Platform-facing data model for pull requests and review comments.
//!
//! These types are the "normalized output" of the metadata fetch and the
//! platform-ready unit produced by the comment mapper.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// High-level metadata for a pull request (title, state, URLs).
///
/// Fetched once per run and read-only afterwards. `description` stays optional
/// because GitHub reports an absent body as JSON `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub title: String,
    pub description: Option<String>,
    pub state: String,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One platform-ready inline comment, anchored to a file and line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewComment {
    /// Repo-relative path of the file the comment is attached to.
    pub path: String,
    /// Line number in the post-change file (or pre-change for removed lines).
    pub line: u32,
    /// Markdown body.
    pub body: String,
}
