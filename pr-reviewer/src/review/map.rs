//! Comment mapper: findings → platform-ready records.

use tracing::warn;

use crate::platform::ReviewComment;
use crate::review::llm::ReviewFinding;

/// Anchors a chunk's findings to a concrete file path.
///
/// Deterministic and idempotent: the same (path, findings) pair always yields
/// the same records, in finding order. A `None` path (deleted file) yields
/// nothing even though such files are already excluded upstream.
/// A finding whose `lineNumber` is not base-10 numeric is dropped with a
/// warning; the reported number is not range-checked against the chunk, the
/// platform call is the arbiter of a line that misses the diff.
pub fn map_findings(target_path: Option<&str>, findings: &[ReviewFinding]) -> Vec<ReviewComment> {
    let Some(path) = target_path else {
        return Vec::new();
    };

    findings
        .iter()
        .filter_map(|f| match f.line_number.trim().parse::<u32>() {
            Ok(line) => Some(ReviewComment {
                path: path.to_string(),
                line,
                body: f.review_comment.clone(),
            }),
            Err(_) => {
                warn!(
                    "map: dropping finding with non-numeric lineNumber {:?} in {}",
                    f.line_number, path
                );
                None
            }
        })
        .collect()
}
