//! Model invocation config, loaded once from the environment.

use crate::error_handler::{
    Result, env_opt_u32, must_env, validate_http_endpoint, validate_range_f32,
};

/// Configuration for an LLM model invocation.
///
/// This struct contains both connection and decoding parameters. It can be
/// extended as needed to support new backends or features.
///
/// # Fields
///
/// - `model`: The model identifier (e.g., `"gpt-4o-mini"`).
/// - `endpoint`: The inference endpoint base URL (remote API or proxy).
/// - `api_key`: Optional API key for providers that require authentication.
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `temperature`: Controls randomness (0.0 = deterministic, >1.0 = more random).
/// - `top_p`: Nucleus sampling cutoff (alternative to temperature).
/// - `timeout_secs`: Optional request timeout in seconds.
#[derive(Debug, Clone)]
pub struct LlmModelConfig {
    /// Model identifier string (e.g., `"gpt-4o-mini"`).
    pub model: String,

    /// Inference endpoint base URL (e.g., `https://api.openai.com`).
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (kept low for review determinism).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Builds the config from environment variables.
    ///
    /// Required: `OPENAI_API_KEY`. Optional with defaults: `OPENAI_API_URL`
    /// (`https://api.openai.com`), `OPENAI_API_MODEL` (`gpt-4o-mini`),
    /// `OPENAI_MAX_TOKENS` (700), `OPENAI_TIMEOUT_SECS` (60).
    ///
    /// Decoding parameters are fixed at a deterministic-leaning setting
    /// (`temperature = 0.2`, `top_p = 1.0`) rather than read from env; review
    /// output is meant to be reproducible, not creative.
    ///
    /// # Errors
    /// [`crate::error_handler::ConfigError`] when a required variable is
    /// missing, a number does not parse, or the endpoint has no HTTP scheme.
    pub fn from_env() -> Result<Self> {
        let api_key = must_env("OPENAI_API_KEY")?;
        let endpoint =
            std::env::var("OPENAI_API_URL").unwrap_or_else(|_| "https://api.openai.com".into());
        validate_http_endpoint("OPENAI_API_URL", &endpoint)?;

        let model =
            std::env::var("OPENAI_API_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let max_tokens = env_opt_u32("OPENAI_MAX_TOKENS")?.or(Some(700));
        let timeout_secs = env_opt_u32("OPENAI_TIMEOUT_SECS")?
            .map(u64::from)
            .or(Some(60));

        let cfg = Self {
            model,
            endpoint,
            api_key: Some(api_key),
            max_tokens,
            temperature: Some(0.2),
            top_p: Some(1.0),
            timeout_secs,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates field values independently of where they came from.
    ///
    /// # Errors
    /// [`crate::error_handler::ConfigError`] on an empty model name or a
    /// decoding parameter outside its allowed range.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(crate::error_handler::ConfigError::EmptyModel.into());
        }
        if let Some(t) = self.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0)?;
        }
        if let Some(p) = self.top_p {
            validate_range_f32("top_p", p, 0.0, 1.0)?;
        }
        Ok(())
    }
}
