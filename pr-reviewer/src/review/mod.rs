//! Review stage: prompt building, model requests, and comment mapping.

pub mod llm;
pub mod map;
pub mod prompt;

pub use llm::{ReviewFinding, ReviewModel, request_review};
pub use map::map_findings;
pub use prompt::build_review_prompt;
