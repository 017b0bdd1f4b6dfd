// Copyright 2026 The Velora Project
// SPDX-License-Identifier: Apache-2.0

// HTTP surface.
//
// Responsibilities:
// - Router construction with CORS and a request body cap
// - Request validation for the forward endpoints
// - Relay of single-shot completions (analyze_image, generate_reply,
//   charm_reply)
// - Heartbeat endpoint
//
// The wake streaming endpoint lives in crate::wake; everything here is
// plain request/response forwarding.

use crate::config::Config;
use crate::generation::{
    ChatMessage, ChatRequest, ContentPart, GenerationClient, GenerationError, ImageUrl,
};
use crate::prompt;
use crate::wake;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Maximum accepted request body; large enough for base64 image payloads.
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// How many image parts a charm_reply request may carry upstream.
const MAX_CHARM_IMAGES: usize = 2;

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// Shared state injected into axum handlers. The generation client is
/// a trait object so tests run against scripted implementations.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub generation: Arc<dyn GenerationClient>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by the forward endpoints.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Required input missing or of the wrong shape.
    #[error("{0}")]
    MissingInput(String),

    /// The model was asked for structured JSON and returned something else.
    #[error("Model returned invalid JSON")]
    ModelOutput { raw: String },

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            ApiError::MissingInput(message) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": message }),
            ),
            ApiError::ModelOutput { raw } => (
                StatusCode::BAD_GATEWAY,
                serde_json::json!({ "error": "Model returned invalid JSON", "raw": raw }),
            ),
            ApiError::Generation(GenerationError::Timeout(_)) => (
                StatusCode::GATEWAY_TIMEOUT,
                serde_json::json!({ "error": self.to_string() }),
            ),
            ApiError::Generation(e) => (
                StatusCode::BAD_GATEWAY,
                serde_json::json!({ "error": e.to_string() }),
            ),
        };

        if status.is_server_error() {
            tracing::warn!(status = %status, error = %self, "request failed");
        }
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// analyze_image
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeImageRequest {
    #[serde(default)]
    pub image_base64: Option<String>,
}

/// The two-field object the model is constrained to return. Missing
/// fields degrade to empty strings rather than an error.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ImageAnalysis {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub summary: String,
}

pub async fn analyze_image(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeImageRequest>,
) -> Result<Json<ImageAnalysis>, ApiError> {
    let image = request
        .image_base64
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::MissingInput("No image provided".to_string()))?;

    let chat = ChatRequest {
        model: state.config.vision_model.clone(),
        messages: prompt::analyze_image_messages(image),
        temperature: Some(0.9),
        max_tokens: Some(300),
        response_format: Some(prompt::analyze_image_response_format()),
    };

    // With json_schema the model returns a JSON string in content.
    let raw = state.generation.complete(chat).await?;
    let parsed: ImageAnalysis =
        serde_json::from_str(&raw).map_err(|_| ApiError::ModelOutput { raw })?;
    Ok(Json(parsed))
}

// ---------------------------------------------------------------------------
// generate_reply
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GenerateReplyRequest {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub mood: String,
}

#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub reply: String,
}

pub async fn generate_reply(
    State(state): State<AppState>,
    Json(request): Json<GenerateReplyRequest>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let chat = ChatRequest {
        model: state.config.text_model.clone(),
        messages: prompt::generate_reply_messages(&request.summary, &request.mood),
        temperature: Some(0.9),
        max_tokens: Some(120),
        response_format: None,
    };

    let reply = state.generation.complete(chat).await?;
    Ok(Json(ReplyResponse { reply }))
}

// ---------------------------------------------------------------------------
// charm_reply
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CharmReplyRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Prior conversation turns, relayed verbatim between system prompt
    /// and the new user message. Must be an array.
    #[serde(default)]
    pub history: Option<serde_json::Value>,
    #[serde(default)]
    pub images: Option<serde_json::Value>,
}

pub async fn charm_reply(
    State(state): State<AppState>,
    Json(request): Json<CharmReplyRequest>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let history_value = request
        .history
        .filter(|h| h.is_array())
        .ok_or_else(|| ApiError::MissingInput("Provide 'history' as an array".to_string()))?;

    let message = request
        .message
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let raw_images = request
        .images
        .as_ref()
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();

    if message.is_none() && raw_images.is_empty() {
        return Err(ApiError::MissingInput(
            "Provide 'message' and/or at least one image in 'images'".to_string(),
        ));
    }

    tracing::debug!(
        has_message = message.is_some(),
        history_len = history_value.as_array().map(|h| h.len()).unwrap_or(0),
        images_len = raw_images.len(),
        "charm_reply request"
    );

    let history: Vec<ChatMessage> = serde_json::from_value(history_value).map_err(|e| {
        ApiError::MissingInput(format!("history entries must be chat messages: {e}"))
    })?;

    // Accept only proper URLs / data URLs, capped to keep payloads sane.
    let image_parts = raw_images
        .iter()
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .filter(|u| u.starts_with("http") || u.starts_with("data:image/"))
        .take(MAX_CHARM_IMAGES)
        .map(|url| ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: url.to_string(),
            },
        });

    let mut parts: Vec<ContentPart> = Vec::new();
    if let Some(text) = message {
        parts.push(ContentPart::Text {
            text: text.to_string(),
        });
    }
    parts.extend(image_parts);

    let mut messages = vec![ChatMessage::system(prompt::CHARM_SYSTEM)];
    messages.extend(history);
    messages.push(ChatMessage::user_parts(parts));

    let chat = ChatRequest {
        model: state.config.vision_model.clone(),
        messages,
        temperature: Some(0.9),
        max_tokens: Some(160),
        response_format: None,
    };

    let reply = state.generation.complete(chat).await?;
    Ok(Json(ReplyResponse { reply }))
}

// ---------------------------------------------------------------------------
// Heartbeat + router construction
// ---------------------------------------------------------------------------

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Build the axum router. All collaborators arrive through `state`;
/// nothing here touches process-wide globals.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/analyze_image", post(analyze_image))
        .route("/generate_reply", post(generate_reply))
        .route("/charm_reply", post(charm_reply))
        .route("/wake", post(wake::wake_handler))
        .layer(cors)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
