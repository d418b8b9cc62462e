//! Environment-driven bot configuration.
//!
//! Everything is read once at startup, before any network call; a missing
//! credential aborts the run there and then.

use std::path::PathBuf;

use crate::errors::{ConfigError, PrResult};

/// Static configuration for one review run.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Token used for every GitHub API call.
    pub github_token: String,
    /// GitHub REST API base, e.g. `https://api.github.com`.
    pub github_api_url: String,
    /// Path of the trigger-event payload file (`GITHUB_EVENT_PATH`).
    pub event_path: PathBuf,
    /// Raw comma-separated glob exclusion list (may be empty).
    pub exclude_patterns: String,
}

impl BotConfig {
    /// Builds the config from environment variables.
    ///
    /// Required: `GITHUB_TOKEN`, `GITHUB_EVENT_PATH`. Optional with defaults:
    /// `GITHUB_API_URL` (`https://api.github.com`), `EXCLUDE_PATTERNS` (empty).
    ///
    /// # Errors
    /// [`ConfigError::MissingVar`] when a required variable is absent or
    /// empty; [`ConfigError::InvalidBaseUrl`] when the API base has no HTTP
    /// scheme.
    pub fn from_env() -> PrResult<Self> {
        let github_token = must_env("GITHUB_TOKEN")?;
        let event_path = PathBuf::from(must_env("GITHUB_EVENT_PATH")?);
        let github_api_url =
            std::env::var("GITHUB_API_URL").unwrap_or_else(|_| "https://api.github.com".into());
        if !(github_api_url.starts_with("http://") || github_api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(github_api_url).into());
        }
        let exclude_patterns = std::env::var("EXCLUDE_PATTERNS").unwrap_or_default();

        Ok(Self {
            github_token,
            github_api_url: github_api_url.trim_end_matches('/').to_string(),
            event_path,
            exclude_patterns,
        })
    }
}

/// Fetches a required, non-empty environment variable.
fn must_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn must_env_rejects_missing_and_blank() {
        assert!(must_env("PR_REVIEWER_TEST_UNSET_VAR").is_err());
        // SAFETY: test-local variable.
        unsafe { std::env::set_var("PR_REVIEWER_TEST_BLANK_VAR", " ") };
        assert!(must_env("PR_REVIEWER_TEST_BLANK_VAR").is_err());
    }
}
