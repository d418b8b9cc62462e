//! Crate-wide error hierarchy for pr-reviewer.
//!
//! Goals:
//! - Single root `Error` for all public functions.
//! - Platform-aware mapping (401→Unauthorized, 429→RateLimited, 5xx→Server, etc.).
//! - Distinct root variants for the two fatal pipeline failures (diff fetch,
//!   review submission) so callers can tell them apart without string matching.
//! - No dynamic dispatch, no async-trait, ergonomic `?` via `From` impls.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type PrResult<T> = Result<T, Error>;

/// Root error type for the pr-reviewer crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problems (missing tokens, bad glob patterns, etc.).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Trigger-event payload problems (unreadable, malformed, incomplete).
    #[error(transparent)]
    Event(#[from] EventError),

    /// Fetching PR metadata or diff text failed. Fatal: no diff, no review.
    #[error("fetch failed: {0}")]
    Fetch(#[source] ProviderError),

    /// The batched review submission was rejected. Fatal: there is no
    /// partial-credit retry for a half-posted review.
    #[error("review submission failed: {0}")]
    Submission(#[source] ProviderError),

    /// Platform (GitHub) failure outside the fetch/submission stages.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Model collaborator failure. Recovered per chunk by the requester;
    /// surfaces at root level only from setup code.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Detailed platform-specific error used inside the platform layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Gateway/Server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (4xx/3xx) not covered above.
    #[error("http status error: {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// JSON deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Unexpected/invalid shape of platform response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Configuration and setup errors (tokens, model id, exclusion patterns).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// An exclusion glob did not compile.
    #[error("invalid exclusion pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Base API URL had no HTTP scheme.
    #[error("invalid base api url: {0}")]
    InvalidBaseUrl(String),
}

/// Trigger-event payload errors.
#[derive(Debug, Error)]
pub enum EventError {
    /// The payload file could not be read.
    #[error("cannot read event payload: {0}")]
    Read(#[from] std::io::Error),

    /// The payload was not valid JSON.
    #[error("malformed event payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field the pipeline cannot run without was absent.
    #[error("event payload missing required field: {0}")]
    MissingField(&'static str),
}

/// Model collaborator errors (one variant set for transport and decoding).
#[derive(Debug, Error)]
pub enum ModelError {
    /// Timeout at transport level.
    #[error("model timeout")]
    Timeout,

    /// Network/transport failure without status.
    #[error("model transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status from the model service.
    #[error("model http status error: {0}")]
    HttpStatus(u16),

    /// Completion payload could not be decoded.
    #[error("model response decode error: {0}")]
    Decode(String),

    /// Service-side configuration problem (key, endpoint).
    #[error("model service config error: {0}")]
    Config(String),
}

// ===== Conversions for `?` ergonomics =====

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Provider(ProviderError::from(e))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return ProviderError::Timeout;
        }
        if let Some(status) = e.status() {
            let code = status.as_u16();
            return match code {
                401 => ProviderError::Unauthorized,
                403 => ProviderError::Forbidden,
                404 => ProviderError::NotFound,
                429 => ProviderError::RateLimited {
                    retry_after_secs: None,
                },
                500..=599 => ProviderError::Server(code),
                _ => ProviderError::HttpStatus(code),
            };
        }
        ProviderError::Network(e.to_string())
    }
}

impl From<llm_service::LlmServiceError> for ModelError {
    fn from(e: llm_service::LlmServiceError) -> Self {
        use llm_service::{LlmServiceError as E, ProviderError as P};
        match e {
            E::Config(c) => ModelError::Config(c.to_string()),
            E::Provider(P::HttpStatus { status, .. }) => ModelError::HttpStatus(status.as_u16()),
            E::Provider(P::Decode(msg)) => ModelError::Decode(msg),
            E::Provider(P::EmptyChoices) => ModelError::Decode("empty choices".into()),
            E::Provider(p) => ModelError::Config(p.to_string()),
            E::HttpTransport(t) if t.is_timeout() => ModelError::Timeout,
            E::HttpTransport(t) => ModelError::Transport(t.to_string()),
            // The service error enums are non_exhaustive.
            other => ModelError::Transport(other.to_string()),
        }
    }
}
