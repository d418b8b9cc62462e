//! Review requester: one model call per chunk, strict shape validation.
//!
//! The model must answer with `{"reviews": [{"lineNumber", "reviewComment"}]}`.
//! Anything else (transport failure, timeout, stray text, unknown fields)
//! collapses to `None` here and is only logged; a bad response for one chunk
//! must never abort review of the rest of the PR.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::ModelError;

/// Seam to the language-model collaborator.
///
/// One attempt per prompt; no retry anywhere in the pipeline.
#[allow(async_fn_in_trait)]
pub trait ReviewModel {
    /// Sends one prompt, returns the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}

impl ReviewModel for llm_service::OpenAiService {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        self.generate(prompt, None).await.map_err(ModelError::from)
    }
}

/// One model-proposed finding, untrusted until mapped onto the diff.
///
/// `line_number` stays textual here; base-10 parsing happens at the mapping
/// stage, where a failure drops the finding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReviewFinding {
    pub line_number: String,
    pub review_comment: String,
}

/// Expected completion shape.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReviewResponse {
    reviews: Vec<ReviewFinding>,
}

/// Requests findings for one rendered prompt.
///
/// `Some(vec![])` means the model answered and found nothing to flag;
/// `None` means the call or its validation failed and the chunk contributes
/// zero findings.
pub async fn request_review(model: &impl ReviewModel, prompt: &str) -> Option<Vec<ReviewFinding>> {
    let raw = match model.complete(prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("llm: completion failed, skipping chunk: {}", e);
            return None;
        }
    };

    let cleaned = sanitize_json_block(&raw);
    match serde_json::from_str::<ReviewResponse>(&cleaned) {
        Ok(resp) => {
            debug!("llm: response ok, findings={}", resp.reviews.len());
            Some(resp.reviews)
        }
        Err(e) => {
            warn!(
                "llm: response did not match the review shape, skipping chunk: {}",
                e
            );
            None
        }
    }
}

/// Remove any markdown fences and pre/post-text; extract the first JSON object.
/// This is deliberately tolerant: we accept `{...}` anywhere in the string.
pub fn sanitize_json_block(s: &str) -> String {
    // Remove code fences if present
    let no_fence = s
        .replace("```json", "")
        .replace("```", "")
        .replace('\u{feff}', "") // BOM
        .trim()
        .to_string();

    // Try to find the first '{' and the matching last '}'.
    if let (Some(start), Some(end)) = (no_fence.find('{'), no_fence.rfind('}')) {
        if start < end {
            return no_fence[start..=end].to_string();
        }
    }
    // Fallback: return as-is; caller will attempt JSON parse (and log on failure).
    no_fence
}
