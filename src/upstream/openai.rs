//! OpenAI Images API client for illustration generation

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::UpstreamError;

/// Image generation request
#[derive(Debug, Serialize)]
struct ImageRequest {
    model: String,
    prompt: String,
    n: u32,
    size: String,
}

/// Image generation response
#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: String,
}

/// OpenAI API client
#[derive(Debug)]
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAiClient {
    /// Create a new client.
    ///
    /// Reads `OPENAI_API_KEY` and `OPENAI_API_URL` from the environment.
    /// An absent key disables illustration generation rather than erroring.
    pub fn new() -> Self {
        let api_key = std::env::var("OPENAI_API_KEY").ok();
        let base_url = std::env::var("OPENAI_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

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

    /// Generate a single image, returning its URL
    pub async fn generate_image(
        &self,
        prompt: &str,
        model: &str,
        size: &str,
    ) -> Result<String, UpstreamError> {
        let api_key = self.api_key.as_ref().ok_or(UpstreamError::Auth)?;

        let request = ImageRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            n: 1,
            size: size.to_string(),
        };

        debug!("Sending image generation request to model {}", request.model);

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAI API error: {} - {}", status, body);
            return Err(UpstreamError::from_status(status, body));
        }

        let image_response: ImageResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;

        image_response
            .data
            .first()
            .map(|d| d.url.clone())
            .ok_or_else(|| UpstreamError::InvalidResponse("no image in response".to_string()))
    }
}

impl Default for OpenAiClient {
    fn default() -> Self {
        Self::new()
    }
}
