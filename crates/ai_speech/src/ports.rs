//! Port definitions for speech processing
//!
//! Defines the traits that speech provider clients implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, SynthesizedSpeech, Transcription};

/// Port for Speech-to-Text (STT) implementations
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe audio to text
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the provider rejects the audio or is unreachable.
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError>;

    /// Get the name of the current STT model
    fn model_name(&self) -> &str;
}

/// Port for Text-to-Speech (TTS) implementations
///
/// Providers host the generated audio and hand back a URL to it.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize speech for `text`, using `voice` or the configured default
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::NoAudioReturned` when the provider answers
    /// without an audio file.
    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
    ) -> Result<SynthesizedSpeech, SpeechError>;

    fn default_voice(&self) -> &str;
}
