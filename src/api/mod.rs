//! HTTP API module - REST endpoints

mod story;

use std::sync::Arc;
use std::time::Instant;

use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{extract::State, Json, Router};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::upstream::{AnthropicClient, OpenAiClient};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub anthropic: Arc<AnthropicClient>,
    pub openai: Arc<OpenAiClient>,
    /// Process start, for the health endpoint's uptime
    pub started: Instant,
}

/// Build the API router
pub fn router(config: Arc<Config>) -> Router {
    let state = AppState {
        config,
        anthropic: Arc::new(AnthropicClient::new()),
        openai: Arc::new(OpenAiClient::new()),
        started: Instant::now(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/generate-story", post(story::generate_story))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Service descriptor
async fn root() -> impl IntoResponse {
    Json(RootResponse {
        name: "storyd",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            health: "/health",
            generate_story: "/api/generate-story (POST)",
        },
    })
}

#[derive(Serialize)]
struct RootResponse {
    name: &'static str,
    version: &'static str,
    endpoints: Endpoints,
}

#[derive(Serialize)]
struct Endpoints {
    health: &'static str,
    #[serde(rename = "generateStory")]
    generate_story: &'static str,
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime: state.started.elapsed().as_secs_f64(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    uptime: f64,
}

/// Fallback for unmatched routes
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "error": "Endpoint not found" })),
    )
}
