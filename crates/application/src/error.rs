//! Application-level errors
//!
//! [`ApplicationError`] covers orchestration and storage concerns. Each port
//! has its own error type so the orchestrator can classify failures by stage
//! without inspecting provider messages.

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Failure reported by a [`TranscriptionPort`](crate::ports::TranscriptionPort)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranscriptionError {
    /// Provider processed the audio but heard nothing
    #[error("No speech detected")]
    NoSpeech,

    /// Provider rejected the request or was unreachable
    #[error("Transcription provider error: {0}")]
    Provider(String),

    /// Call exceeded the configured deadline
    #[error("Transcription timed out after {0}ms")]
    Timeout(u64),
}

/// Failure reported by a [`GenerationPort`](crate::ports::GenerationPort)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Language model provider error: {0}")]
    Provider(String),

    /// Provider answered without usable text
    #[error("Language model returned an empty response")]
    EmptyResponse,

    #[error("Generation timed out after {0}ms")]
    Timeout(u64),
}

/// Failure reported by a [`SynthesisPort`](crate::ports::SynthesisPort)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("Speech synthesis provider error: {0}")]
    Provider(String),

    #[error("Speech synthesis timed out after {0}ms")]
    Timeout(u64),

    /// Provider succeeded but returned no audio reference
    #[error("Speech synthesis returned no audio")]
    NoAudioReturned,
}
