//! Story generation endpoint
//!
//! POST /api/generate-story - Generate a children's story, optionally
//! with one illustration per narrative segment.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::AppState;
use crate::story::{illustrate_story, IllustrationSet, StoryParts};
use crate::upstream::UpstreamError;

/// Fixed message for failures whose detail must stay hidden
const GENERIC_FAILURE: &str = "Failed to generate story.";

/// Story generation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_generate_images")]
    pub generate_images: bool,
    #[serde(default = "default_age")]
    pub age: u32,
}

fn default_generate_images() -> bool {
    true
}

fn default_age() -> u32 {
    5
}

/// Story generation response
#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub success: bool,
    pub story: String,
    pub images: Option<IllustrationSet>,
    pub parts: Option<StoryParts>,
    pub metadata: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub model: String,
    pub tokens: u32,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: message.into(),
        }),
    )
        .into_response()
}

/// Generate a story from a prompt
pub async fn generate_story(
    State(state): State<AppState>,
    Json(req): Json<StoryRequest>,
) -> Response {
    if req.prompt.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Prompt is required");
    }
    if req.prompt.chars().count() > state.config.max_prompt_chars {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!(
                "Prompt must be at most {} characters",
                state.config.max_prompt_chars
            ),
        );
    }

    info!("Generating story");

    let completion = match state
        .anthropic
        .generate(
            &req.prompt,
            &state.config.model,
            state.config.max_tokens,
            state.config.temperature,
        )
        .await
    {
        Ok(completion) => completion,
        Err(e) => return upstream_failure(&state, e),
    };

    // Illustrations are optional and best-effort: requested but
    // unconfigured means no images, and a failed slot stays null.
    let (images, parts) = if req.generate_images && state.openai.is_configured() {
        info!("Generating illustrations");
        let parts = StoryParts::split(&completion.text);
        let images = illustrate_story(&state.openai, &state.config, &parts, req.age).await;
        (Some(images), Some(parts))
    } else {
        (None, None)
    };

    Json(StoryResponse {
        success: true,
        story: completion.text,
        images,
        parts,
        metadata: Metadata {
            model: state.config.model.clone(),
            tokens: completion.output_tokens,
        },
    })
    .into_response()
}

/// Map an upstream failure to an HTTP response.
///
/// Raw upstream detail is only appended when the server is configured
/// to expose it (non-production mode).
fn upstream_failure(state: &AppState, err: UpstreamError) -> Response {
    warn!("Story generation failed: {}", err);

    let (status, message) = match err {
        UpstreamError::RateLimited => (
            StatusCode::TOO_MANY_REQUESTS,
            "Story provider rate limit exceeded",
        ),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE),
    };

    let error = if state.config.expose_upstream_errors {
        format!("{} ({})", message, err)
    } else {
        message.to_string()
    };

    error_response(status, error)
}
