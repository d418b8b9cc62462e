//! Event resolver: trigger payload → `ChangeEvent` → raw diff text.
//!
//! A "created" event diffs the PR's full range; an "updated" event diffs the
//! old head against the new head. Any other action is a soft no-op for the
//! whole run, so parsing returns `None` for it rather than an error.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::errors::{Error, EventError, PrResult};
use crate::platform::GithubApi;

/// Which revisions the run reviews, resolved once from the trigger payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// PR was opened: review its full range.
    Opened {
        owner: String,
        repo: String,
        pull_number: u64,
    },
    /// PR head moved: review only what changed between the two heads.
    Synchronized {
        owner: String,
        repo: String,
        pull_number: u64,
        before: String,
        after: String,
    },
}

impl ChangeEvent {
    /// Reads and parses the payload file (`GITHUB_EVENT_PATH`).
    ///
    /// # Errors
    /// [`EventError::Read`] when the file is unreadable; parse/shape errors
    /// as in [`ChangeEvent::from_json`].
    pub fn from_file(path: &Path) -> Result<Option<Self>, EventError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses a pull-request event payload.
    ///
    /// Returns `Ok(None)` for actions this bot does not handle ("closed",
    /// "labeled", ...): unsupported actions are not failures.
    ///
    /// # Errors
    /// [`EventError::Parse`] on invalid JSON; [`EventError::MissingField`]
    /// when a supported action lacks a field the pipeline cannot run without.
    pub fn from_json(raw: &str) -> Result<Option<Self>, EventError> {
        let payload: EventPayload = serde_json::from_str(raw)?;

        let action = match payload.action.as_deref() {
            Some(a @ ("opened" | "synchronize")) => a.to_string(),
            other => {
                debug!("event: unsupported action {:?}", other);
                return Ok(None);
            }
        };

        let repository = payload
            .repository
            .ok_or(EventError::MissingField("repository"))?;
        let owner = repository
            .owner
            .and_then(|o| o.login)
            .ok_or(EventError::MissingField("repository.owner.login"))?;
        let repo = repository
            .name
            .ok_or(EventError::MissingField("repository.name"))?;
        let pull_number = payload.number.ok_or(EventError::MissingField("number"))?;

        let event = match action.as_str() {
            "opened" => ChangeEvent::Opened {
                owner,
                repo,
                pull_number,
            },
            _ => ChangeEvent::Synchronized {
                owner,
                repo,
                pull_number,
                before: payload.before.ok_or(EventError::MissingField("before"))?,
                after: payload.after.ok_or(EventError::MissingField("after"))?,
            },
        };
        Ok(Some(event))
    }

    pub fn owner(&self) -> &str {
        match self {
            Self::Opened { owner, .. } | Self::Synchronized { owner, .. } => owner,
        }
    }

    pub fn repo(&self) -> &str {
        match self {
            Self::Opened { repo, .. } | Self::Synchronized { repo, .. } => repo,
        }
    }

    pub fn pull_number(&self) -> u64 {
        match self {
            Self::Opened { pull_number, .. } | Self::Synchronized { pull_number, .. } => {
                *pull_number
            }
        }
    }
}

/// Fetches the raw unified diff the event asks to review.
///
/// # Errors
/// [`Error::Fetch`]: no diff means no review is possible.
pub async fn resolve_diff(api: &impl GithubApi, event: &ChangeEvent) -> PrResult<String> {
    let diff = match event {
        ChangeEvent::Opened {
            owner,
            repo,
            pull_number,
        } => {
            debug!("event: opened → full PR diff");
            api.get_pull_request_diff(owner, repo, *pull_number).await
        }
        ChangeEvent::Synchronized {
            owner,
            repo,
            before,
            after,
            ..
        } => {
            debug!("event: synchronize → compare {}...{}", before, after);
            api.get_compare_diff(owner, repo, before, after).await
        }
    }
    .map_err(Error::Fetch)?;
    Ok(diff)
}

/// --- Payload shapes (subset of fields we actually use) ---

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    number: Option<u64>,
    #[serde(default)]
    repository: Option<RepositoryPayload>,
    #[serde(default)]
    before: Option<String>,
    #[serde(default)]
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    owner: Option<OwnerPayload>,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    #[serde(default)]
    login: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(action: &str, extra: &str) -> String {
        format!(
            r#"{{
  "action": "{action}",
  "number": 7,
  "repository": {{ "name": "demo", "owner": {{ "login": "acme" }} }}{extra}
}}"#
        )
    }

    #[test]
    fn parses_opened_event() {
        let ev = ChangeEvent::from_json(&payload("opened", "")).unwrap();
        assert_eq!(
            ev,
            Some(ChangeEvent::Opened {
                owner: "acme".into(),
                repo: "demo".into(),
                pull_number: 7,
            })
        );
    }

    #[test]
    fn parses_synchronize_event_with_revisions() {
        let raw = payload("synchronize", r#", "before": "aaa", "after": "bbb""#);
        let ev = ChangeEvent::from_json(&raw).unwrap().unwrap();
        match ev {
            ChangeEvent::Synchronized { before, after, .. } => {
                assert_eq!(before, "aaa");
                assert_eq!(after, "bbb");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn unsupported_action_is_none_not_error() {
        assert_eq!(ChangeEvent::from_json(&payload("closed", "")).unwrap(), None);
    }

    #[test]
    fn missing_required_field_is_fatal() {
        let raw = r#"{ "action": "opened", "number": 7 }"#;
        assert!(matches!(
            ChangeEvent::from_json(raw),
            Err(EventError::MissingField("repository"))
        ));
    }

    #[test]
    fn synchronize_without_revisions_is_fatal() {
        let raw = payload("synchronize", "");
        assert!(matches!(
            ChangeEvent::from_json(&raw),
            Err(EventError::MissingField("before"))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            ChangeEvent::from_json("{not json"),
            Err(EventError::Parse(_))
        ));
    }
}
