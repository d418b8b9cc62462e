//! Unified-diff parser.
//!
//! Features:
//! - Splits multi-file diffs on `diff --git` headers; prelude text is skipped.
//! - Works even if file headers (---/+++) are missing (hunks-only input).
//! - Ignores `\ No newline at end of file` marker lines.
//! - Binary patches heuristics (`GIT binary patch`, `Binary files ... differ`).
//!
//! Parsing is total: malformed sections are skipped, never errors. File and
//! chunk order matches their order of appearance in the input.

use serde::{Deserialize, Serialize};

/// One changed or context line inside a hunk.
///
/// For additions only `new_line` is set, for removals only `old_line`;
/// context lines carry both. Consumers that need a single number should call
/// [`LineChange::resolved_line`], which prefers the post-change coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineChange {
    pub content: String,
    pub new_line: Option<u32>,
    pub old_line: Option<u32>,
}

impl LineChange {
    /// New-file line number when present, old-file number otherwise.
    ///
    /// The fallback mirrors the diff format itself: a removed line only
    /// exists in the pre-change file, so that is the only address it has.
    pub fn resolved_line(&self) -> Option<u32> {
        self.new_line.or(self.old_line)
    }
}

/// A diff hunk: its `@@` descriptor line, raw body text, and parsed lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkDiff {
    /// The full `@@ -a,b +c,d @@ ...` line.
    pub header: String,
    /// Raw hunk body as it appeared in the input (kept for debugging).
    pub raw_content: String,
    pub changes: Vec<LineChange>,
}

/// File-level entry of a parsed diff.
///
/// `target_path` is the post-change path; `None` marks a deleted file
/// (`+++ /dev/null`) and such entries never reach the prompt stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDiff {
    pub target_path: Option<String>,
    pub chunks: Vec<ChunkDiff>,
}

/// Parses raw unified-diff text into file entries, in source order.
///
/// Empty or unparseable input yields an empty vector.
pub fn parse_diff(input: &str) -> Vec<FileDiff> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let mut files = Vec::new();
    if input.contains("diff --git ") {
        let mut section = String::new();
        let mut in_section = false;
        for line in input.lines() {
            if line.starts_with("diff --git ") {
                if in_section {
                    files.push(parse_file_section(&section));
                    section.clear();
                }
                in_section = true;
            }
            if in_section {
                section.push_str(line);
                section.push('\n');
            }
        }
        if in_section {
            files.push(parse_file_section(&section));
        }
    } else {
        // No file headers at all: treat the whole input as one section.
        files.push(parse_file_section(input));
    }
    files
}

/// Parses one `diff --git` section (or a headerless fragment) into a file entry.
fn parse_file_section(section: &str) -> FileDiff {
    let target_path = resolve_target_path(section);
    let chunks = if looks_like_binary_patch(section) {
        Vec::new()
    } else {
        parse_chunks(section)
    };
    FileDiff {
        target_path,
        chunks,
    }
}

/// Resolves the post-change path of a section.
///
/// `+++ /dev/null` and `deleted file mode` both mean deletion (`None`).
/// Sections without `+++` (binary, mode-only) fall back to the `b/` side of
/// the `diff --git` header.
fn resolve_target_path(section: &str) -> Option<String> {
    for line in section.lines() {
        if line.starts_with("@@") {
            break;
        }
        if let Some(rest) = line.strip_prefix("+++ ") {
            let rest = rest.trim();
            if rest == "/dev/null" {
                return None;
            }
            return Some(rest.strip_prefix("b/").unwrap_or(rest).to_string());
        }
    }
    if section.lines().any(|l| l.starts_with("deleted file mode")) {
        return None;
    }
    section
        .lines()
        .next()
        .and_then(|first| first.strip_prefix("diff --git "))
        .and_then(|rest| rest.rsplit_once(" b/"))
        .map(|(_, b)| b.trim().to_string())
}

/// Parses the `@@` hunks of a section into chunks with numbered lines.
fn parse_chunks(section: &str) -> Vec<ChunkDiff> {
    let mut chunks = Vec::new();
    let mut header = String::new();
    let mut raw = String::new();
    let mut changes: Vec<LineChange> = Vec::new();
    let mut old_line = 0u32;
    let mut new_line = 0u32;
    let mut in_chunk = false;

    for line in section.lines() {
        if line.starts_with("@@") {
            if in_chunk {
                chunks.push(ChunkDiff {
                    header: std::mem::take(&mut header),
                    raw_content: std::mem::take(&mut raw),
                    changes: std::mem::take(&mut changes),
                });
            }
            if let Some((old_start, new_start)) = parse_chunk_header(line) {
                old_line = old_start;
                new_line = new_start;
                header = line.to_string();
                in_chunk = true;
            } else {
                // Malformed descriptor: skip lines until the next `@@`.
                in_chunk = false;
            }
            continue;
        }

        // Marker lines are not diff content.
        if line.starts_with("\\ ") {
            continue;
        }

        if !in_chunk {
            // File headers and random prelude before the first `@@`.
            continue;
        }

        raw.push_str(line);
        raw.push('\n');

        if let Some(rest) = line.strip_prefix('+') {
            changes.push(LineChange {
                content: rest.to_string(),
                new_line: Some(new_line),
                old_line: None,
            });
            new_line += 1;
        } else if let Some(rest) = line.strip_prefix('-') {
            changes.push(LineChange {
                content: rest.to_string(),
                new_line: None,
                old_line: Some(old_line),
            });
            old_line += 1;
        } else {
            // Context; a weird unprefixed line is treated the same way.
            let rest = line.strip_prefix(' ').unwrap_or(line);
            changes.push(LineChange {
                content: rest.to_string(),
                new_line: Some(new_line),
                old_line: Some(old_line),
            });
            old_line += 1;
            new_line += 1;
        }
    }

    if in_chunk {
        chunks.push(ChunkDiff {
            header,
            raw_content: raw,
            changes,
        });
    }
    chunks
}

/// Extracts (old_start, new_start) from an `@@ -a,b +c,d @@ ...` line.
fn parse_chunk_header(line: &str) -> Option<(u32, u32)> {
    let mut parts = line.split_whitespace();
    let _at = parts.next()?;
    let old = parts.next()?.strip_prefix('-')?;
    let new = parts.next()?.strip_prefix('+')?;
    Some((hunk_start(old), hunk_start(new)))
}

/// Parses the start of "12,7" or "12" (0 when malformed).
fn hunk_start(s: &str) -> u32 {
    s.split(',')
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// Simple heuristic to detect binary patches or messages in a diff section.
fn looks_like_binary_patch(s: &str) -> bool {
    s.contains("GIT binary patch")
        || s.lines()
            .any(|l| l.starts_with("Binary files ") && l.contains(" differ"))
}
