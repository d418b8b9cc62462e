//! GitHub platform client (REST v3).
//!
//! Endpoints used:
//! - GET  /repos/{owner}/{repo}/pulls/{number}                (metadata)
//! - GET  /repos/{owner}/{repo}/pulls/{number}                (diff media type)
//! - GET  /repos/{owner}/{repo}/compare/{base}...{head}       (diff media type)
//! - POST /repos/{owner}/{repo}/pulls/{number}/reviews        (batched review)
//!
//! Diff text is requested with `Accept: application/vnd.github.v3.diff`
//! instead of re-assembling per-file `patch` fields from the files endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ProviderError;
use crate::platform::types::{PullRequest, ReviewComment};
use crate::platform::GithubApi;
use chrono::{DateTime, Utc};

const MEDIA_TYPE_JSON: &str = "application/vnd.github+json";
const MEDIA_TYPE_DIFF: &str = "application/vnd.github.v3.diff";

/// Runtime configuration for the GitHub client.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// API base, e.g. "https://api.github.com".
    pub base_api: String,
    /// Access token (Actions-provided or PAT).
    pub token: String,
}

/// Thin reqwest client for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String,
    token: String,
}

impl GitHubClient {
    /// Constructs a client with a shared reqwest instance and auth token.
    pub fn new(http: Client, base_api: String, token: String) -> Self {
        Self {
            http,
            base_api,
            token,
        }
    }

    /// Builds the underlying HTTP client and wraps it.
    pub fn from_config(cfg: GithubConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().user_agent("pr-review-bot/0.1").build()?;
        Ok(Self::new(client, cfg.base_api, cfg.token))
    }

    /// Fetches unified diff text from any GitHub URL that supports the diff
    /// media type.
    async fn get_diff_text(&self, url: String) -> Result<String, ProviderError> {
        debug!("github: GET {} (diff media type)", url);
        let text = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, MEDIA_TYPE_DIFF)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}

impl GithubApi for GitHubClient {
    /// Fetches PR metadata (title/description/state and timestamps).
    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequest, ProviderError> {
        let url = format!("{}/repos/{}/{}/pulls/{}", self.base_api, owner, repo, number);
        debug!("github: GET {}", url);
        let resp: GithubPull = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, MEDIA_TYPE_JSON)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(PullRequest {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
            title: resp.title,
            description: resp.body,
            state: resp.state,
            html_url: resp.html_url,
            created_at: resp.created_at,
            updated_at: resp.updated_at,
        })
    }

    async fn get_pull_request_diff(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/repos/{}/{}/pulls/{}", self.base_api, owner, repo, number);
        self.get_diff_text(url).await
    }

    async fn get_compare_diff(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.base_api, owner, repo, base, head
        );
        self.get_diff_text(url).await
    }

    /// Creates one review carrying all inline comments with the `COMMENT`
    /// event, so the submission neither approves nor requests changes.
    async fn create_review(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        comments: &[ReviewComment],
    ) -> Result<(), ProviderError> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/reviews",
            self.base_api, owner, repo, number
        );
        debug!("github: POST {} (comments={})", url, comments.len());
        self.http
            .post(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, MEDIA_TYPE_JSON)
            .json(&CreateReviewRequest {
                event: "COMMENT",
                comments,
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// --- GitHub response/request shapes (subset of fields we actually use) ---

#[derive(Debug, Deserialize)]
struct GithubPull {
    title: String,
    #[serde(default)]
    body: Option<String>,
    state: String,
    html_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct CreateReviewRequest<'a> {
    event: &'a str,
    comments: &'a [ReviewComment],
}
