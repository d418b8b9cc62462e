//! Review submitter.
//!
//! All accumulated comments go out as one batched review with a "comment"
//! disposition. An empty batch performs no call at all; a rejected submission
//! fails the run (no partial submission, no retry).

use std::time::Instant;

use tracing::info;

use crate::errors::{Error, PrResult};
use crate::platform::{GithubApi, ReviewComment};

/// Submits the run's aggregated comments as a single review.
///
/// # Errors
/// [`Error::Submission`] when the platform rejects the batch.
pub async fn submit_review(
    api: &impl GithubApi,
    owner: &str,
    repo: &str,
    number: u64,
    comments: &[ReviewComment],
) -> PrResult<()> {
    if comments.is_empty() {
        info!("publish: no comments produced, skipping review submission");
        return Ok(());
    }

    let t0 = Instant::now();
    info!(
        "publish: submitting review with {} comments to {}/{}#{}",
        comments.len(),
        owner,
        repo,
        number
    );
    api.create_review(owner, repo, number, comments)
        .await
        .map_err(Error::Submission)?;
    info!("publish: done in {} ms", t0.elapsed().as_millis());
    Ok(())
}
