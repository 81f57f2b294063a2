//! Upstream AI provider clients
//!
//! Provides:
//! - Story text generation via the Anthropic Messages API
//! - Illustration generation via the OpenAI Images API
//!
//! Clients are constructed once at startup and shared across requests;
//! they hold no per-request state.

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

use thiserror::Error;

/// Failure classes for upstream provider calls
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// API key missing or rejected by the provider
    #[error("provider rejected credentials")]
    Auth,

    /// Provider returned 429
    #[error("provider rate limit exceeded")]
    RateLimited,

    /// Any other non-success HTTP status
    #[error("provider returned status {status}: {detail}")]
    Api { status: u16, detail: String },

    /// Transport-level failure
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Response parsed but missing the expected payload
    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),
}

impl UpstreamError {
    /// Map a non-success HTTP status plus body text into an error class
    pub(crate) fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 | 403 => UpstreamError::Auth,
            429 => UpstreamError::RateLimited,
            code => UpstreamError::Api {
                status: code,
                detail: body,
            },
        }
    }
}
