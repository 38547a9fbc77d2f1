//! Transcription port - Interface for speech-to-text

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::TranscriptionError;

/// Recorded audio submitted for one turn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioInput {
    /// Raw audio bytes as uploaded
    pub bytes: Vec<u8>,
    /// MIME type reported by the client (e.g. `audio/webm`)
    pub content_type: Option<String>,
}

impl AudioInput {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

impl From<Vec<u8>> for AudioInput {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes, None)
    }
}

/// Result of a transcription operation
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    /// Transcribed text, untrimmed as returned by the provider
    pub text: String,
    /// Confidence score (0.0 - 1.0) when the provider reports one
    pub confidence: Option<f32>,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
        }
    }
}

/// Port for speech-to-text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranscriptionPort: Send + Sync {
    /// Transcribe audio to text
    async fn transcribe(&self, audio: AudioInput) -> Result<Transcript, TranscriptionError>;

    /// True iff the provider's credentials are configured
    fn is_available(&self) -> bool;
}
