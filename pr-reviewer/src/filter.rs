//! Path filter: exclusion globs + unconditional deletion drop.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::errors::{ConfigError, PrResult};
use crate::parser::FileDiff;

/// Compiled exclusion rules for file paths.
///
/// Built once per run from the raw comma-separated pattern list. Matching is
/// case-sensitive against the full repo-relative path; `*` does not cross a
/// `/`, matching the shell-glob semantics the patterns are written in.
#[derive(Debug)]
pub struct ExcludeRules {
    set: GlobSet,
    pattern_count: usize,
}

impl ExcludeRules {
    /// Compiles the raw comma-separated pattern list (`"*.md, dist/**"`).
    ///
    /// Entries are trimmed; empty entries are dropped, so an empty or
    /// all-comma string yields rules that exclude nothing.
    ///
    /// # Errors
    /// [`ConfigError::InvalidPattern`] when a pattern does not compile.
    pub fn from_raw(raw: &str) -> PrResult<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut pattern_count = 0usize;
        for pat in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let glob = GlobBuilder::new(pat)
                .literal_separator(true)
                .build()
                .map_err(|e| ConfigError::InvalidPattern {
                    pattern: pat.to_string(),
                    reason: e.to_string(),
                })?;
            builder.add(glob);
            pattern_count += 1;
        }
        let set = builder.build().map_err(|e| ConfigError::InvalidPattern {
            pattern: raw.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { set, pattern_count })
    }

    /// True when the entry must not be reviewed: deleted files always,
    /// otherwise any path matching the exclusion set.
    pub fn is_excluded(&self, file: &FileDiff) -> bool {
        match &file.target_path {
            None => true,
            Some(path) => self.set.is_match(path),
        }
    }

    /// Drops excluded entries, preserving the order of the rest.
    pub fn apply(&self, files: Vec<FileDiff>) -> Vec<FileDiff> {
        let before = files.len();
        let kept: Vec<FileDiff> = files.into_iter().filter(|f| !self.is_excluded(f)).collect();
        debug!(
            "filter: kept {} of {} files (patterns={})",
            kept.len(),
            before,
            self.pattern_count
        );
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: Option<&str>) -> FileDiff {
        FileDiff {
            target_path: path.map(str::to_string),
            chunks: Vec::new(),
        }
    }

    #[test]
    fn excludes_matching_pattern() {
        let rules = ExcludeRules::from_raw("*.md, yarn.lock").unwrap();
        assert!(rules.is_excluded(&file(Some("README.md"))));
        assert!(rules.is_excluded(&file(Some("yarn.lock"))));
        assert!(!rules.is_excluded(&file(Some("src/main.rs"))));
    }

    #[test]
    fn always_excludes_deletions() {
        let rules = ExcludeRules::from_raw("").unwrap();
        assert!(rules.is_excluded(&file(None)));
    }

    #[test]
    fn star_stays_within_a_path_segment() {
        let rules = ExcludeRules::from_raw("*.md").unwrap();
        assert!(!rules.is_excluded(&file(Some("docs/README.md"))));

        let rules = ExcludeRules::from_raw("**/*.md").unwrap();
        assert!(rules.is_excluded(&file(Some("docs/README.md"))));
    }

    #[test]
    fn empty_list_keeps_everything_but_deletions() {
        let rules = ExcludeRules::from_raw(" , ,").unwrap();
        let kept = rules.apply(vec![file(Some("a.rs")), file(None), file(Some("b.md"))]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].target_path.as_deref(), Some("a.rs"));
    }

    #[test]
    fn bad_pattern_is_a_config_error() {
        assert!(ExcludeRules::from_raw("a[").is_err());
    }
}
