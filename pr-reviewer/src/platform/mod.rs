//! Platform seam: the `GithubApi` trait and its reqwest implementation.
//!
//! The pipeline never talks to GitHub directly; every stage that needs the
//! platform takes `&impl GithubApi`, so tests can substitute a scripted
//! double. Plain `async fn` in the trait, no async-trait and no `Box<dyn ...>`.

pub mod types;
pub use types::*;

pub mod github;
pub use github::{GitHubClient, GithubConfig};

use crate::errors::ProviderError;

/// Operations the pipeline consumes from the hosting platform.
///
/// All methods attempt exactly one HTTP call; retrying is the caller's
/// decision (and this pipeline never retries).
#[allow(async_fn_in_trait)]
pub trait GithubApi {
    /// Fetch PR metadata (title, description, state, timestamps).
    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequest, ProviderError>;

    /// Fetch the PR's full unified diff text.
    async fn get_pull_request_diff(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<String, ProviderError>;

    /// Fetch the unified diff text between two revisions.
    async fn get_compare_diff(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<String, ProviderError>;

    /// Submit one batched review with a "comment" disposition.
    async fn create_review(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        comments: &[ReviewComment],
    ) -> Result<(), ProviderError>;
}
