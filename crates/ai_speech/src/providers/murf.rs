//! Murf speech synthesis provider
//!
//! Calls `POST {base}/speech/generate-with-key`. Murf renders the audio and
//! returns a URL to the hosted file rather than the bytes themselves.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::SynthesizedSpeech;

/// Murf text-to-speech provider
#[derive(Debug, Clone)]
pub struct MurfSpeechProvider {
    client: Client,
    config: SpeechConfig,
    api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    voice_id: &'a str,
    text: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    audio_file: Option<String>,
    #[serde(default)]
    audio_length_in_seconds: Option<f64>,
}

impl MurfSpeechProvider {
    /// Create a new Murf provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the API key is missing or the
    /// configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let api_key = config
            .murf_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| SpeechError::Configuration("Murf API key is required".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/speech/generate-with-key",
            self.config.murf_base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl TextToSpeech for MurfSpeechProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
    ) -> Result<SynthesizedSpeech, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        let voice_id = voice.unwrap_or(&self.config.default_voice);
        debug!(voice_id, "Synthesizing speech with Murf");

        let request = GenerateRequest {
            voice_id,
            text,
            format: self.config.output_format.murf_name(),
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SpeechError::from_reqwest(&e, self.config.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(%status, "Murf request failed");

            return Err(if status == StatusCode::TOO_MANY_REQUESTS {
                SpeechError::RateLimited
            } else {
                SpeechError::SynthesisFailed(format!("HTTP {status}: {error_body}"))
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let audio_url = body
            .audio_file
            .filter(|url| !url.trim().is_empty())
            .ok_or(SpeechError::NoAudioReturned)?;

        debug!(duration_secs = ?body.audio_length_in_seconds, "Synthesis complete");

        Ok(SynthesizedSpeech {
            audio_url,
            voice_id: voice_id.to_string(),
            duration_secs: body.audio_length_in_seconds,
        })
    }

    fn default_voice(&self) -> &str {
        &self.config.default_voice
    }
}
