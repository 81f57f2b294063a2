//! Mock upstream provider server
//!
//! Serves Anthropic-shaped `/messages` and OpenAI-shaped
//! `/images/generations` responses on a random local port, with
//! per-endpoint invocation counters for assertions.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

/// Scripted behavior for one test
#[derive(Debug, Clone)]
pub struct Behavior {
    /// Story text returned by the messages endpoint
    pub story: String,
    /// Reported output token count
    pub output_tokens: u32,
    /// Status returned by the messages endpoint
    pub chat_status: u16,
    /// Status returned by the image endpoint
    pub image_status: u16,
    /// Fail only the nth image call (1-based) with a 500, leaving the
    /// other calls to succeed
    pub fail_nth_image: Option<usize>,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            story: "The fox woke up. It found a map! Off it went. \
                    The woods were deep. A river sang. The fox swam across. \
                    At last, treasure. It shared with friends. Then it slept."
                .to_string(),
            output_tokens: 64,
            chat_status: 200,
            image_status: 200,
            fail_nth_image: None,
        }
    }
}

#[derive(Clone)]
struct MockState {
    behavior: Behavior,
    chat_calls: Arc<AtomicUsize>,
    image_calls: Arc<AtomicUsize>,
}

/// Mock provider server handle
pub struct MockUpstream {
    pub addr: SocketAddr,
    chat_calls: Arc<AtomicUsize>,
    image_calls: Arc<AtomicUsize>,
    task: tokio::task::JoinHandle<()>,
}

impl MockUpstream {
    /// Start a mock upstream with the given scripted behavior
    pub async fn start(behavior: Behavior) -> Self {
        let chat_calls = Arc::new(AtomicUsize::new(0));
        let image_calls = Arc::new(AtomicUsize::new(0));

        let state = MockState {
            behavior,
            chat_calls: chat_calls.clone(),
            image_calls: image_calls.clone(),
        };

        let router = Router::new()
            .route("/messages", post(messages))
            .route("/images/generations", post(generations))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock upstream");
        let addr = listener.local_addr().expect("mock upstream addr");

        let task = tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        Self {
            addr,
            chat_calls,
            image_calls,
            task,
        }
    }

    /// Base URL both provider clients should be pointed at
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of text generation calls received
    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    /// Number of image generation calls received
    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn messages(State(state): State<MockState>, Json(_req): Json<Value>) -> impl IntoResponse {
    state.chat_calls.fetch_add(1, Ordering::SeqCst);

    match state.behavior.chat_status {
        200 => (
            StatusCode::OK,
            Json(json!({
                "content": [{"type": "text", "text": state.behavior.story}],
                "usage": {"input_tokens": 10, "output_tokens": state.behavior.output_tokens}
            })),
        ),
        code => (
            StatusCode::from_u16(code).expect("valid scripted status"),
            Json(json!({
                "error": {"type": "scripted", "message": "scripted upstream detail"}
            })),
        ),
    }
}

async fn generations(State(state): State<MockState>, Json(_req): Json<Value>) -> impl IntoResponse {
    let n = state.image_calls.fetch_add(1, Ordering::SeqCst) + 1;

    let status = if state.behavior.fail_nth_image == Some(n) {
        500
    } else {
        state.behavior.image_status
    };

    match status {
        200 => (
            StatusCode::OK,
            Json(json!({
                "data": [{"url": format!("https://images.test/{}.png", n)}]
            })),
        ),
        code => (
            StatusCode::from_u16(code).expect("valid scripted status"),
            Json(json!({
                "error": {"message": "scripted image failure"}
            })),
        ),
    }
}
