//! Voice agent handlers
//!
//! Every completed turn answers 200 with a [`TurnResponse`], including turns
//! that failed inside the pipeline. Only malformed requests use [`ApiError`].

use application::AudioInput;
use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use chrono::{DateTime, Utc};
use domain::{Message, PipelineOutcome, SessionId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{error::ApiError, state::AppState};

/// Multipart field carrying the recording
pub const AUDIO_FIELD: &str = "audio_file";

/// Result of one voice turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    /// `success`, `partial_success` or `error`
    pub status: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant_message: Option<String>,
    /// Reply audio, or spoken fallback audio when the turn failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl TurnResponse {
    pub fn from_outcome(session_id: &SessionId, outcome: &PipelineOutcome) -> Self {
        Self {
            status: outcome.status().to_string(),
            session_id: session_id.to_string(),
            user_message: outcome.user_text().map(ToString::to_string),
            assistant_message: outcome.assistant_text().map(ToString::to_string),
            audio_url: outcome.audio_ref().map(ToString::to_string),
            stage: outcome.stage().map(|s| s.as_str().to_string()),
            error_type: outcome.error_kind().map(|k| k.as_str().to_string()),
            fallback_message: outcome.fallback_text().map(ToString::to_string),
            timestamp: Utc::now(),
        }
    }
}

/// Session history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub session_id: String,
    /// Oldest first; each entry has `role`, `content` and `timestamp`
    pub messages: Vec<Message>,
    pub count: usize,
}

/// Acknowledgement of a cleared session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearResponse {
    pub session_id: String,
    pub cleared: bool,
}

/// Pull the recording out of the form
///
/// A missing field yields empty audio so the pipeline reports it as an input
/// failure like any other empty recording.
async fn read_audio(mut multipart: Multipart) -> Result<AudioInput, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(ToString::to_string);
        let bytes = field.bytes().await?;
        debug!(size = bytes.len(), content_type = ?content_type, "Received audio upload");
        return Ok(AudioInput::new(bytes.to_vec(), content_type));
    }

    debug!("No {AUDIO_FIELD} field in upload");
    Ok(AudioInput::default())
}

async fn run_turn(
    state: &AppState,
    session_id: SessionId,
    multipart: Multipart,
) -> Result<Json<TurnResponse>, ApiError> {
    // The preflight gate rejects the turn anyway; leave the upload unread
    let audio = if state.orchestrator.availability().all_available() {
        read_audio(multipart).await?
    } else {
        debug!("Providers unavailable, skipping upload");
        AudioInput::default()
    };
    let outcome = state.orchestrator.handle_turn(&session_id, audio).await;

    info!(
        session_id = %session_id,
        status = outcome.status(),
        error_kind = ?outcome.error_kind(),
        "Turn completed"
    );

    Ok(Json(TurnResponse::from_outcome(&session_id, &outcome)))
}

/// Conversational turn on a caller-chosen session
#[instrument(skip(state, multipart))]
pub async fn chat(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<TurnResponse>, ApiError> {
    let session_id = SessionId::parse(&session_id)?;
    run_turn(&state, session_id, multipart).await
}

/// One-shot turn on a freshly generated session
#[instrument(skip(state, multipart))]
pub async fn query(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TurnResponse>, ApiError> {
    run_turn(&state, SessionId::generate(), multipart).await
}

/// Full retained history of a session
#[instrument(skip(state))]
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let session_id = SessionId::parse(&session_id)?;
    let messages = state.orchestrator.history(&session_id);

    Ok(Json(HistoryResponse {
        session_id: session_id.to_string(),
        count: messages.len(),
        messages,
    }))
}

/// Drop a session and its history
#[instrument(skip(state))]
pub async fn clear_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ClearResponse>, ApiError> {
    let session_id = SessionId::parse(&session_id)?;
    if !state.orchestrator.clear_session(&session_id) {
        return Err(ApiError::NotFound(format!("session {session_id}")));
    }

    Ok(Json(ClearResponse {
        session_id: session_id.to_string(),
        cleared: true,
    }))
}
