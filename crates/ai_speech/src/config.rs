//! Configuration for speech processing

use serde::{Deserialize, Serialize};

use crate::types::AudioFormat;

/// Configuration for the speech-to-text and text-to-speech providers
///
/// A provider whose API key is missing is considered unavailable; that is not
/// a configuration error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// OpenAI API key (Whisper transcription)
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// OpenAI API base URL (for custom endpoints)
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Speech-to-text model
    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// Murf API key (speech synthesis)
    #[serde(default)]
    pub murf_api_key: Option<String>,

    /// Murf API base URL
    #[serde(default = "default_murf_base_url")]
    pub murf_base_url: String,

    /// Default voice for TTS
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Output audio format for TTS
    #[serde(default = "default_output_format")]
    pub output_format: AudioFormat,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_stt_model() -> String {
    "whisper-1".to_string()
}

fn default_murf_base_url() -> String {
    "https://api.murf.ai/v1".to_string()
}

fn default_voice() -> String {
    "en-US-marcus".to_string()
}

const fn default_output_format() -> AudioFormat {
    AudioFormat::Mp3
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            stt_model: default_stt_model(),
            murf_api_key: None,
            murf_base_url: default_murf_base_url(),
            default_voice: default_voice(),
            output_format: default_output_format(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn has_key(key: Option<&String>) -> bool {
    key.is_some_and(|k| !k.trim().is_empty())
}

impl SpeechConfig {
    /// Whether transcription credentials are present
    pub fn stt_configured(&self) -> bool {
        has_key(self.openai_api_key.as_ref())
    }

    /// Whether synthesis credentials are present
    pub fn tts_configured(&self) -> bool {
        has_key(self.murf_api_key.as_ref())
    }

    /// Validate the provider-independent settings
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.default_voice.trim().is_empty() {
            return Err("Default voice must not be empty".to_string());
        }

        Ok(())
    }
}
