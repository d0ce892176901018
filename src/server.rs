/*!
 * HTTP API for the speakd synthesis service.
 *
 * One route does the work: `POST /tts` synthesizes speech through the
 * external engine and answers with base64 audio, optionally alongside the
 * parsed caption cues. `GET /voices` exposes the engine's voice catalog
 * and `GET /health` is a liveness probe. CORS-permissive so browser
 * frontends can call the service directly.
 */

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use base64::Engine;
use log::{debug, info, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::app_config::Config;
use crate::caption_parser::{parse_caption_track, CaptionCue};
use crate::errors::{CaptionError, EngineError};
use crate::tts_engine::{SynthesisRequest, TtsEngine, VoiceInfo};

/// Content type of the audio artifact produced by the engine
const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// The TTS engine boundary
    pub engine: Arc<dyn TtsEngine>,
    /// Application configuration
    pub config: Arc<Config>,
    /// Per-process cache of the engine's voice catalog
    voices: Arc<RwLock<Option<Vec<VoiceInfo>>>>,
}

impl AppState {
    /// Create the shared state from an engine and configuration
    pub fn new(engine: Arc<dyn TtsEngine>, config: Arc<Config>) -> Self {
        AppState {
            engine,
            config,
            voices: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build the axum router with the shared [`AppState`]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/tts", post(synthesize))
        .route("/voices", get(voices))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ─── Request / response types ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    /// Text to synthesize (required, non-empty)
    #[serde(default)]
    text: Option<String>,
    /// Voice identifier; falls back to the configured default
    #[serde(default)]
    voice: Option<String>,
    /// Whether to return time-aligned subtitles
    #[serde(default, rename = "withSubtitles")]
    with_subtitles: bool,
}

#[derive(Debug, Serialize)]
pub struct TtsResponse {
    /// Base64-encoded audio artifact
    audio: String,
    #[serde(rename = "contentType")]
    content_type: &'static str,
    /// Parsed caption cues, present only when subtitles were requested and produced
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitles: Option<Vec<CaptionCue>>,
}

#[derive(Debug, Serialize)]
pub struct VoiceListResponse {
    voices: Vec<VoiceInfo>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Uniform error shape of every non-2xx response
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// API-level error carrying the HTTP status it maps to
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Client error: the request itself is unacceptable
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Server error in our own processing
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// The external engine failed or is unreachable
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::Io(_) | EngineError::MissingArtifact(_) => {
                ApiError::internal(error.to_string())
            }
            _ => ApiError::bad_gateway(error.to_string()),
        }
    }
}

impl From<CaptionError> for ApiError {
    fn from(error: CaptionError) -> Self {
        ApiError::internal(error.to_string())
    }
}

// ─── Handlers ──────────────────────────────────────────────────────────────

async fn synthesize(
    State(state): State<AppState>,
    Json(req): Json<TtsRequest>,
) -> Result<Json<TtsResponse>, ApiError> {
    let text = required_trimmed(req.text.as_deref(), "text")?;
    if text.chars().count() > state.config.max_text_length {
        return Err(ApiError::bad_request(format!(
            "Text must not exceed {} characters (got {})",
            state.config.max_text_length,
            text.chars().count()
        )));
    }

    let voice = req
        .voice
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(&state.config.engine.default_voice)
        .to_string();

    let request = SynthesisRequest {
        text,
        voice,
        with_subtitles: req.with_subtitles,
    };

    let output = state.engine.synthesize(&request).await?;
    debug!(
        "Synthesis produced {} audio bytes (captions: {})",
        output.audio.len(),
        output.captions.is_some()
    );

    let subtitles = match output.captions.as_deref() {
        Some(document) => Some(parse_caption_track(document)?),
        None => None,
    };

    Ok(Json(TtsResponse {
        audio: base64::engine::general_purpose::STANDARD.encode(&output.audio),
        content_type: AUDIO_CONTENT_TYPE,
        subtitles,
    }))
}

async fn voices(State(state): State<AppState>) -> Result<Json<VoiceListResponse>, ApiError> {
    if let Some(cached) = state.voices.read().clone() {
        return Ok(Json(VoiceListResponse { voices: cached }));
    }

    let listed = state.engine.list_voices().await?;
    info!("Cached {} voices from the engine catalog", listed.len());
    if listed.is_empty() {
        warn!("Engine returned an empty voice catalog");
    }

    *state.voices.write() = Some(listed.clone());
    Ok(Json(VoiceListResponse { voices: listed }))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Extract a required, non-blank string field
fn required_trimmed(raw: Option<&str>, field_name: &str) -> Result<String, ApiError> {
    let trimmed = raw.unwrap_or("").trim();
    if trimmed.is_empty() {
        return Err(ApiError::bad_request(format!(
            "Missing required `{field_name}` field."
        )));
    }
    Ok(trimmed.to_string())
}
