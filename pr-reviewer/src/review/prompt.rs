//! Prompt builder: one self-contained review request per (file, chunk).
//!
//! Keep prompts compact; the model receives no repository context beyond what
//! is assembled here, and no session state survives between chunks.

use crate::parser::ChunkDiff;
use crate::platform::PullRequest;

/// Renders the bounded review request for one chunk of one file.
///
/// Embeds the fixed reviewing instructions, the target path, the PR title and
/// description (context only), the hunk descriptor, and every change line
/// prefixed with its resolved line number (new-file number if present, else
/// old).
pub fn build_review_prompt(path: &str, chunk: &ChunkDiff, pr: &PullRequest) -> String {
    let mut s = String::new();
    s.push_str("Your task is to review pull requests. Instructions:\n");
    s.push_str(
        "- Provide the response in the following JSON format: \
         {\"reviews\": [{\"lineNumber\": \"<line_number>\", \"reviewComment\": \"<review comment>\"}]}\n",
    );
    s.push_str("- Do not give positive comments or compliments.\n");
    s.push_str(
        "- Provide comments and suggestions ONLY if there is something to improve, \
         otherwise \"reviews\" should be an empty array.\n",
    );
    s.push_str("- Write the comment in GitHub Markdown format.\n");
    s.push_str(
        "- Use the given description only for the overall context and only comment the code.\n",
    );
    s.push_str("- IMPORTANT: NEVER suggest adding comments to the code.\n");

    s.push_str(&format!(
        "\nReview the following code diff in the file \"{}\" and take the pull request \
         title and description into account when writing the response.\n",
        path
    ));
    s.push_str(&format!("\nPull request title: {}\n", pr.title));
    s.push_str("Pull request description:\n\n---\n");
    s.push_str(pr.description.as_deref().unwrap_or(""));
    s.push_str("\n---\n");

    s.push_str("\nGit diff to review:\n\n```diff\n");
    s.push_str(&chunk.header);
    s.push('\n');
    for change in &chunk.changes {
        match change.resolved_line() {
            Some(line) => s.push_str(&format!("{} {}\n", line, change.content)),
            None => {
                s.push_str(&change.content);
                s.push('\n');
            }
        }
    }
    s.push_str("```\n");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LineChange;
    use chrono::Utc;

    fn pr() -> PullRequest {
        PullRequest {
            owner: "acme".into(),
            repo: "demo".into(),
            number: 7,
            title: "Add frobnicator".into(),
            description: Some("Implements the frobnicator.".into()),
            state: "open".into(),
            html_url: "https://github.com/acme/demo/pull/7".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn chunk() -> ChunkDiff {
        ChunkDiff {
            header: "@@ -1,2 +1,3 @@".into(),
            raw_content: String::new(),
            changes: vec![
                LineChange {
                    content: "let a = 1;".into(),
                    new_line: Some(5),
                    old_line: None,
                },
                LineChange {
                    content: "let b = 2;".into(),
                    new_line: None,
                    old_line: Some(3),
                },
            ],
        }
    }

    #[test]
    fn embeds_path_title_header_and_numbered_lines() {
        let prompt = build_review_prompt("src/frob.rs", &chunk(), &pr());
        assert!(prompt.contains("\"src/frob.rs\""));
        assert!(prompt.contains("Pull request title: Add frobnicator"));
        assert!(prompt.contains("@@ -1,2 +1,3 @@"));
        // Addition resolves to its new-file number, removal to the old one.
        assert!(prompt.contains("5 let a = 1;"));
        assert!(prompt.contains("3 let b = 2;"));
    }

    #[test]
    fn carries_the_fixed_instructions() {
        let prompt = build_review_prompt("a.rs", &chunk(), &pr());
        assert!(prompt.contains("\"reviews\" should be an empty array"));
        assert!(prompt.contains("NEVER suggest adding comments"));
        assert!(prompt.contains("{\"reviews\": [{\"lineNumber\""));
    }

    #[test]
    fn missing_description_renders_empty_context_block() {
        let mut p = pr();
        p.description = None;
        let prompt = build_review_prompt("a.rs", &chunk(), &p);
        assert!(prompt.contains("---\n\n---"));
    }
}
