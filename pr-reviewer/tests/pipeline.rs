//! End-to-end pipeline tests against scripted collaborator doubles.
//!
//! No network: the platform and the model are in-memory fakes plugged in
//! through the `GithubApi` / `ReviewModel` seams.

use std::sync::Mutex;

use chrono::Utc;

use pr_reviewer::errors::{Error, ModelError, ProviderError};
use pr_reviewer::event::ChangeEvent;
use pr_reviewer::filter::ExcludeRules;
use pr_reviewer::platform::{GithubApi, PullRequest, ReviewComment};
use pr_reviewer::review::ReviewModel;
use pr_reviewer::run_review;

/// Platform double: serves a fixed PR + diff, records every call.
struct ScriptedApi {
    pr: PullRequest,
    diff: String,
    fail_submission: bool,
    diff_fetches: Mutex<Vec<String>>,
    submissions: Mutex<Vec<Vec<ReviewComment>>>,
}

impl ScriptedApi {
    fn new(diff: &str) -> Self {
        Self {
            pr: PullRequest {
                owner: "acme".into(),
                repo: "demo".into(),
                number: 7,
                title: "Add frobnicator".into(),
                description: Some("Implements the frobnicator.".into()),
                state: "open".into(),
                html_url: "https://github.com/acme/demo/pull/7".into(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            diff: diff.to_string(),
            fail_submission: false,
            diff_fetches: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    fn submitted(&self) -> Vec<Vec<ReviewComment>> {
        self.submissions.lock().unwrap().clone()
    }
}

impl GithubApi for ScriptedApi {
    async fn get_pull_request(
        &self,
        _owner: &str,
        _repo: &str,
        _number: u64,
    ) -> Result<PullRequest, ProviderError> {
        Ok(self.pr.clone())
    }

    async fn get_pull_request_diff(
        &self,
        _owner: &str,
        _repo: &str,
        number: u64,
    ) -> Result<String, ProviderError> {
        self.diff_fetches.lock().unwrap().push(format!("full:{number}"));
        Ok(self.diff.clone())
    }

    async fn get_compare_diff(
        &self,
        _owner: &str,
        _repo: &str,
        base: &str,
        head: &str,
    ) -> Result<String, ProviderError> {
        self.diff_fetches
            .lock()
            .unwrap()
            .push(format!("compare:{base}...{head}"));
        Ok(self.diff.clone())
    }

    async fn create_review(
        &self,
        _owner: &str,
        _repo: &str,
        _number: u64,
        comments: &[ReviewComment],
    ) -> Result<(), ProviderError> {
        if self.fail_submission {
            return Err(ProviderError::Server(502));
        }
        self.submissions.lock().unwrap().push(comments.to_vec());
        Ok(())
    }
}

/// Model double: pops pre-seeded outcomes in chunk order.
struct ScriptedModel {
    outputs: Mutex<Vec<Result<String, ModelError>>>,
    calls: Mutex<usize>,
}

impl ScriptedModel {
    fn new(outputs: Vec<Result<String, ModelError>>) -> Self {
        Self {
            outputs: Mutex::new(outputs),
            calls: Mutex::new(0),
        }
    }

    fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl ReviewModel for ScriptedModel {
    async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
        *self.calls.lock().unwrap() += 1;
        let mut outputs = self.outputs.lock().unwrap();
        if outputs.is_empty() {
            Ok(r#"{"reviews": []}"#.into())
        } else {
            outputs.remove(0)
        }
    }
}

fn opened_event() -> ChangeEvent {
    ChangeEvent::Opened {
        owner: "acme".into(),
        repo: "demo".into(),
        pull_number: 7,
    }
}

fn no_rules() -> ExcludeRules {
    ExcludeRules::from_raw("").unwrap()
}

const ADDED_FILE_DIFF: &str = "\
diff --git a/a.ts b/a.ts
new file mode 100644
--- /dev/null
+++ b/a.ts
@@ -0,0 +1,3 @@
+let state = 0;
+state += 1;
+export default state;
";

#[tokio::test]
async fn opened_event_posts_one_mapped_comment() {
    let api = ScriptedApi::new(ADDED_FILE_DIFF);
    let model = ScriptedModel::new(vec![Ok(
        r#"{"reviews": [{"lineNumber": "2", "reviewComment": "avoid mutable state"}]}"#.into(),
    )]);

    let summary = run_review(&api, &model, &opened_event(), &no_rules())
        .await
        .unwrap();

    assert_eq!(summary.files_reviewed, 1);
    assert_eq!(summary.chunks_reviewed, 1);
    assert_eq!(summary.comments_posted, 1);
    assert_eq!(
        api.submitted(),
        vec![vec![ReviewComment {
            path: "a.ts".into(),
            line: 2,
            body: "avoid mutable state".into(),
        }]]
    );
    assert_eq!(api.diff_fetches.lock().unwrap().as_slice(), ["full:7"]);
}

#[tokio::test]
async fn synchronize_event_uses_the_compare_diff() {
    let api = ScriptedApi::new(ADDED_FILE_DIFF);
    let model = ScriptedModel::new(vec![Ok(r#"{"reviews": []}"#.into())]);
    let event = ChangeEvent::Synchronized {
        owner: "acme".into(),
        repo: "demo".into(),
        pull_number: 7,
        before: "aaa".into(),
        after: "bbb".into(),
    };

    run_review(&api, &model, &event, &no_rules()).await.unwrap();

    assert_eq!(
        api.diff_fetches.lock().unwrap().as_slice(),
        ["compare:aaa...bbb"]
    );
}

#[tokio::test]
async fn excluded_path_never_reaches_the_model() {
    let diff = "\
diff --git a/README.md b/README.md
--- a/README.md
+++ b/README.md
@@ -1 +1,2 @@
 # readme
+extra line
";
    let api = ScriptedApi::new(diff);
    let model = ScriptedModel::new(Vec::new());
    let rules = ExcludeRules::from_raw("*.md").unwrap();

    let summary = run_review(&api, &model, &opened_event(), &rules)
        .await
        .unwrap();

    assert_eq!(model.call_count(), 0);
    assert_eq!(summary.files_reviewed, 0);
    assert!(api.submitted().is_empty());
}

#[tokio::test]
async fn model_failure_skips_the_chunk_and_run_still_succeeds() {
    let api = ScriptedApi::new(ADDED_FILE_DIFF);
    let model = ScriptedModel::new(vec![Err(ModelError::Transport("connection reset".into()))]);

    let summary = run_review(&api, &model, &opened_event(), &no_rules())
        .await
        .unwrap();

    assert_eq!(summary.chunks_failed, 1);
    assert_eq!(summary.comments_posted, 0);
    assert!(api.submitted().is_empty());
}

#[tokio::test]
async fn failed_chunk_does_not_stop_later_chunks() {
    let diff = "\
diff --git a/a.rs b/a.rs
--- a/a.rs
+++ b/a.rs
@@ -1,2 +1,2 @@
-let a = 0;
+let a = 1;
@@ -10,2 +10,2 @@
-let b = 0;
+let b = 1;
";
    let api = ScriptedApi::new(diff);
    let model = ScriptedModel::new(vec![
        Err(ModelError::Timeout),
        Ok(r#"{"reviews": [{"lineNumber": "10", "reviewComment": "name this"}]}"#.into()),
    ]);

    let summary = run_review(&api, &model, &opened_event(), &no_rules())
        .await
        .unwrap();

    assert_eq!(summary.chunks_failed, 1);
    assert_eq!(summary.chunks_reviewed, 1);
    assert_eq!(api.submitted()[0][0].line, 10);
}

#[tokio::test]
async fn deleted_file_is_skipped_entirely() {
    let diff = "\
diff --git a/gone.rs b/gone.rs
deleted file mode 100644
--- a/gone.rs
+++ /dev/null
@@ -1,2 +0,0 @@
-fn gone() {}
-
";
    let api = ScriptedApi::new(diff);
    let model = ScriptedModel::new(Vec::new());

    let summary = run_review(&api, &model, &opened_event(), &no_rules())
        .await
        .unwrap();

    assert_eq!(model.call_count(), 0);
    assert_eq!(summary.files_reviewed, 0);
    assert!(api.submitted().is_empty());
}

#[test]
fn unsupported_action_resolves_to_no_event() {
    let raw = r#"{
  "action": "closed",
  "number": 7,
  "repository": { "name": "demo", "owner": { "login": "acme" } }
}"#;
    assert_eq!(ChangeEvent::from_json(raw).unwrap(), None);
}

#[tokio::test]
async fn rejected_submission_fails_the_run() {
    let mut api = ScriptedApi::new(ADDED_FILE_DIFF);
    api.fail_submission = true;
    let model = ScriptedModel::new(vec![Ok(
        r#"{"reviews": [{"lineNumber": "1", "reviewComment": "x"}]}"#.into(),
    )]);

    let err = run_review(&api, &model, &opened_event(), &no_rules())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Submission(_)));
}
