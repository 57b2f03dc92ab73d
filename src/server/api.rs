//! HTTP API of the relay.
//!
//! - POST /api/prompt: streaming prompt generation (SSE)
//! - GET /health: liveness probe

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::{header, HeaderName};
use axum::response::sse::{KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::prompt::{build_prompt, Presets};
use crate::provider::CompletionClient;
use crate::server::streaming::provider_to_sse_stream;

/// Application state shared across handlers.
pub struct AppState {
    pub client: CompletionClient,
    pub config: Arc<Config>,
    pub start_time: Instant,
}

/// Build the axum router with all routes and layers.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/prompt", post(generate_prompt))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ─── Request/Response Types ────────────────────────────────────────────────

/// Prompt generation request.
#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    /// The user's raw ideas for the image.
    pub text: String,

    /// Style presets; absent fields stay unset.
    #[serde(default)]
    pub presets: Presets,

    /// Accepted for wire compatibility and discarded; the upstream model
    /// is always the configured default.
    #[serde(default)]
    pub model: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub model: String,
}

// ─── Route Handlers ────────────────────────────────────────────────────────

async fn generate_prompt(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PromptRequest>,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4().to_string();

    if let Some(model) = &req.model {
        debug!(request_id = %request_id, model = %model, "Ignoring caller-supplied model hint");
    }
    info!(
        request_id = %request_id,
        text_len = req.text.len(),
        "Prompt request"
    );

    let prompt = build_prompt(&req.text, &req.presets);
    let rx = state.client.stream(request_id, prompt);

    // Headers are committed here; any later failure arrives as an SSE
    // `error` frame, never as an HTTP error status.
    (
        [
            (header::CONTENT_TYPE, "text/event-stream; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache, no-transform"),
            (header::CONNECTION, "keep-alive"),
            (HeaderName::from_static("x-accel-buffering"), "no"),
        ],
        Sse::new(provider_to_sse_stream(rx)).keep_alive(KeepAlive::default()),
    )
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        model: state.config.provider.default_model.clone(),
    })
}
