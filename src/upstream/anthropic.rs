//! Anthropic Messages API client for story text generation

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::UpstreamError;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Messages API request
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

/// Messages API response
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    output_tokens: u32,
}

/// A completed story generation
#[derive(Debug, Clone)]
pub struct Completion {
    /// Generated story text
    pub text: String,
    /// Output tokens reported by the provider (0 when unreported)
    pub output_tokens: u32,
}

/// Anthropic API client
#[derive(Debug)]
pub struct AnthropicClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl AnthropicClient {
    /// Create a new client.
    ///
    /// Reads `ANTHROPIC_API_KEY` (falling back to `ANTHROPIC_KEY`) and
    /// `ANTHROPIC_API_URL` from the environment.
    pub fn new() -> Self {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .or_else(|_| std::env::var("ANTHROPIC_KEY"))
            .ok();
        let base_url = std::env::var("ANTHROPIC_API_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com/v1".to_string());

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap(),
            api_key,
            base_url,
        }
    }

    /// Check if an API key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate story text from a single user prompt
    pub async fn generate(
        &self,
        prompt: &str,
        model: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Completion, UpstreamError> {
        let api_key = self.api_key.as_ref().ok_or(UpstreamError::Auth)?;

        let request = MessagesRequest {
            model: model.to_string(),
            max_tokens,
            temperature,
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        debug!("Sending story request to model {}", request.model);

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Anthropic API error: {} - {}", status, body);
            return Err(UpstreamError::from_status(status, body));
        }

        let messages_response: MessagesResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;

        // An empty text block is still a valid completion; only a
        // missing content array is an error.
        let text = messages_response
            .content
            .first()
            .map(|block| block.text.clone())
            .ok_or_else(|| UpstreamError::InvalidResponse("no content blocks".to_string()))?;

        let output_tokens = messages_response
            .usage
            .map(|u| u.output_tokens)
            .unwrap_or(0);

        Ok(Completion {
            text,
            output_tokens,
        })
    }
}

impl Default for AnthropicClient {
    fn default() -> Self {
        Self::new()
    }
}
