//! Inference errors

use thiserror::Error;

/// Errors that can occur during inference
#[derive(Debug, Clone, Error)]
pub enum InferenceError {
    /// Failed to connect to inference server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to inference server failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Model not found or not enabled for this key
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model returned no candidate text
    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl InferenceError {
    /// Classify a transport error, reporting timeouts against `timeout_ms`
    pub fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
