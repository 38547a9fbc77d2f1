//! Health check handlers

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use domain::ServiceAvailability;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Whether a provider is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Available,
    Unavailable,
}

impl From<bool> for ServiceState {
    fn from(available: bool) -> Self {
        if available {
            Self::Available
        } else {
            Self::Unavailable
        }
    }
}

/// Per-provider status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStates {
    pub tts: ServiceState,
    pub stt: ServiceState,
    pub llm: ServiceState,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` when every provider is configured, otherwise `degraded`
    pub status: String,
    pub message: String,
    pub services: ServiceStates,
    /// Language model used for replies
    pub model: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn from_availability(availability: ServiceAvailability, model: impl Into<String>) -> Self {
        let (status, message) = if availability.all_available() {
            ("healthy", "All services operational")
        } else {
            ("degraded", "Some services unavailable")
        };

        Self {
            status: status.to_string(),
            message: message.to_string(),
            services: ServiceStates {
                tts: availability.tts.into(),
                stt: availability.stt.into(),
                llm: availability.llm.into(),
            },
            model: model.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Liveness and provider configuration; always 200
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::from_availability(
        state.orchestrator.availability(),
        state.orchestrator.current_model(),
    ))
}
