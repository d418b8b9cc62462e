//! Shared LLM service: OpenAI chat-completions provider with unified errors
//! and env-driven model configuration.
//!
//! The service is deliberately thin: one non-streaming completion call per
//! request, a pinned JSON-object response format, and no retry policy. Shape
//! validation of the returned JSON belongs to the caller.

pub mod config;
pub mod error_handler;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{ConfigError, LlmServiceError, ProviderError};
pub use services::open_ai_service::OpenAiService;
