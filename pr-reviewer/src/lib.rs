//! Public entry for the pr-reviewer pipeline.
//!
//! Single high-level function to run the whole diff-to-feedback pipeline for
//! a pull request:
//!
//! 1) **Resolve** — PR metadata + the raw diff the trigger event asks for
//!    (full range for "opened", head-to-head compare for "synchronize").
//! 2) **Parse** — unified diff text into ordered file/chunk/line units.
//! 3) **Filter** — drop deletions and paths matching the exclusion globs.
//! 4) **Review** — per chunk, strictly in order: build one self-contained
//!    prompt, request a shape-validated model response, map findings onto
//!    the file. A failed chunk contributes nothing and the loop continues.
//! 5) **Publish** — all comments as one batched "comment" review; nothing is
//!    submitted when the batch is empty.
//!
//! Both collaborators come in as plain-trait parameters (`GithubApi`,
//! `ReviewModel`); the pipeline holds no global clients. `tracing` is used
//! for per-stage debug logging, with no async-trait and no heap trait
//! objects (no `Box<dyn ...>`).

pub mod config;
pub mod errors;
pub mod event;
pub mod filter;
pub mod parser;
pub mod platform;
pub mod publish;
pub mod review;

use std::time::Instant;
use tracing::{debug, info};

use errors::{Error, PrResult};
use event::ChangeEvent;
use filter::ExcludeRules;
use platform::{GithubApi, ReviewComment};
use review::ReviewModel;

/// Counters for the final run summary log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files that survived the path filter.
    pub files_reviewed: usize,
    /// Chunks whose model response validated.
    pub chunks_reviewed: usize,
    /// Chunks skipped after a failed call or non-conforming response.
    pub chunks_failed: usize,
    /// Comments carried by the submitted review (0 = nothing submitted).
    pub comments_posted: usize,
}

/// Runs the whole pipeline for one change event.
///
/// Chunks are processed strictly sequentially, one model request in flight
/// at a time, so the final comment order is deterministic: file order, then
/// chunk order, then finding order.
///
/// # Errors
/// - [`Error::Fetch`] when PR metadata or diff text cannot be fetched.
/// - [`Error::Submission`] when the platform rejects the batched review.
///
/// Per-chunk model failures are not errors; they only show up in
/// [`RunSummary::chunks_failed`].
pub async fn run_review(
    api: &impl GithubApi,
    model: &impl ReviewModel,
    event: &ChangeEvent,
    rules: &ExcludeRules,
) -> PrResult<RunSummary> {
    let t0 = Instant::now();
    debug!(
        "resolve: fetch PR metadata {}/{}#{}",
        event.owner(),
        event.repo(),
        event.pull_number()
    );
    let pr = api
        .get_pull_request(event.owner(), event.repo(), event.pull_number())
        .await
        .map_err(Error::Fetch)?;
    debug!("resolve: PR \"{}\" ({})", pr.title, pr.state);

    let diff = event::resolve_diff(api, event).await?;
    debug!(
        "resolve: diff fetched, {} bytes ({} ms)",
        diff.len(),
        t0.elapsed().as_millis()
    );

    let t1 = Instant::now();
    let files = parser::parse_diff(&diff);
    debug!(
        "parse: {} file entries ({} ms)",
        files.len(),
        t1.elapsed().as_millis()
    );

    let files = rules.apply(files);

    let t2 = Instant::now();
    let mut comments: Vec<ReviewComment> = Vec::new();
    let mut summary = RunSummary {
        files_reviewed: files.len(),
        ..RunSummary::default()
    };

    for file in &files {
        let path = file.target_path.as_deref();
        for chunk in &file.chunks {
            let Some(path) = path else {
                // Deletions are filtered above; nothing to anchor to here.
                break;
            };
            let prompt = review::build_review_prompt(path, chunk, &pr);
            match review::request_review(model, &prompt).await {
                Some(findings) => {
                    summary.chunks_reviewed += 1;
                    comments.extend(review::map_findings(Some(path), &findings));
                }
                None => summary.chunks_failed += 1,
            }
        }
    }
    debug!(
        "review: {} chunks ok, {} failed, {} comments ({} ms)",
        summary.chunks_reviewed,
        summary.chunks_failed,
        comments.len(),
        t2.elapsed().as_millis()
    );

    publish::submit_review(api, event.owner(), event.repo(), event.pull_number(), &comments)
        .await?;
    summary.comments_posted = comments.len();

    info!(
        "run done: files={} chunks_ok={} chunks_failed={} comments={} in {} ms",
        summary.files_reviewed,
        summary.chunks_reviewed,
        summary.chunks_failed,
        summary.comments_posted,
        t0.elapsed().as_millis()
    );
    Ok(summary)
}

// -----------------------------------------------------------------------------
// Convenience re-exports for downstream users
// -----------------------------------------------------------------------------

pub use config::BotConfig;
pub use errors::Error as ReviewerError;
pub use event::ChangeEvent as ReviewerChangeEvent;
pub use filter::ExcludeRules as ReviewerExcludeRules;
pub use platform::{GitHubClient, GithubConfig, PullRequest};
