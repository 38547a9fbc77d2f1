//! Speech adapters - Implement the transcription and synthesis ports using ai_speech

use std::sync::Arc;

use ai_speech::{
    AudioData, AudioFormat, MurfSpeechProvider, OpenAISpeechProvider, SpeechConfig, SpeechError,
    SpeechToText, TextToSpeech,
};
use application::error::{ApplicationError, SynthesisError, TranscriptionError};
use application::ports::{AudioInput, SynthesisPort, Transcript, TranscriptionPort};
use async_trait::async_trait;
use domain::AudioRef;
use tracing::{debug, info, instrument};

/// Speech-to-text adapter
///
/// Unavailable when no provider is configured; `transcribe` then fails fast
/// without touching the network.
#[derive(Clone)]
pub struct SpeechTranscriptionAdapter {
    provider: Option<Arc<dyn SpeechToText>>,
}

impl std::fmt::Debug for SpeechTranscriptionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechTranscriptionAdapter")
            .field(
                "provider",
                &self.provider.as_ref().map(|p| p.model_name().to_string()),
            )
            .finish()
    }
}

impl SpeechTranscriptionAdapter {
    /// Build from configuration; a missing OpenAI key yields an unavailable adapter
    ///
    /// # Errors
    ///
    /// Returns an error if a key is present but the HTTP client cannot be built.
    pub fn from_config(config: &SpeechConfig) -> Result<Self, ApplicationError> {
        if !config.stt_configured() {
            info!("No transcription API key configured, STT unavailable");
            return Ok(Self::unavailable());
        }

        let provider = OpenAISpeechProvider::new(config.clone())
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_provider(Arc::new(provider)))
    }

    pub fn with_provider(provider: Arc<dyn SpeechToText>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub const fn unavailable() -> Self {
        Self { provider: None }
    }

    fn map_error(err: SpeechError) -> TranscriptionError {
        match err {
            SpeechError::Timeout(ms) => TranscriptionError::Timeout(ms),
            SpeechError::RateLimited => {
                TranscriptionError::Provider("rate limited by transcription provider".to_string())
            },
            other => TranscriptionError::Provider(other.to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionPort for SpeechTranscriptionAdapter {
    #[instrument(skip(self, audio), fields(audio_size = audio.len(), content_type = ?audio.content_type))]
    async fn transcribe(&self, audio: AudioInput) -> Result<Transcript, TranscriptionError> {
        let Some(provider) = &self.provider else {
            return Err(TranscriptionError::Provider(
                "transcription provider not configured".to_string(),
            ));
        };

        let format = AudioFormat::from_mime_type_or_default(audio.content_type.as_deref());
        let transcription = provider
            .transcribe(AudioData::new(audio.bytes, format))
            .await
            .map_err(Self::map_error)?;

        if transcription.is_empty() {
            debug!("Transcription contained no words");
            return Err(TranscriptionError::NoSpeech);
        }

        debug!(
            text_len = transcription.text.len(),
            language = ?transcription.language,
            "Transcription complete"
        );

        Ok(Transcript {
            text: transcription.text.trim().to_string(),
            confidence: transcription.confidence,
        })
    }

    fn is_available(&self) -> bool {
        self.provider.is_some()
    }
}

/// Text-to-speech adapter
#[derive(Clone)]
pub struct SpeechSynthesisAdapter {
    provider: Option<Arc<dyn TextToSpeech>>,
}

impl std::fmt::Debug for SpeechSynthesisAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechSynthesisAdapter")
            .field(
                "default_voice",
                &self.provider.as_ref().map(|p| p.default_voice().to_string()),
            )
            .finish()
    }
}

impl SpeechSynthesisAdapter {
    /// Build from configuration; a missing Murf key yields an unavailable adapter
    ///
    /// # Errors
    ///
    /// Returns an error if a key is present but the HTTP client cannot be built.
    pub fn from_config(config: &SpeechConfig) -> Result<Self, ApplicationError> {
        if !config.tts_configured() {
            info!("No synthesis API key configured, TTS unavailable");
            return Ok(Self::unavailable());
        }

        let provider = MurfSpeechProvider::new(config.clone())
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_provider(Arc::new(provider)))
    }

    pub fn with_provider(provider: Arc<dyn TextToSpeech>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub const fn unavailable() -> Self {
        Self { provider: None }
    }

    fn map_error(err: SpeechError) -> SynthesisError {
        match err {
            SpeechError::Timeout(ms) => SynthesisError::Timeout(ms),
            SpeechError::NoAudioReturned => SynthesisError::NoAudioReturned,
            other => SynthesisError::Provider(other.to_string()),
        }
    }
}

#[async_trait]
impl SynthesisPort for SpeechSynthesisAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(
        &self,
        text: String,
        voice_id: Option<String>,
    ) -> Result<AudioRef, SynthesisError> {
        let Some(provider) = &self.provider else {
            return Err(SynthesisError::Provider(
                "synthesis provider not configured".to_string(),
            ));
        };

        let speech = provider
            .synthesize(&text, voice_id.as_deref())
            .await
            .map_err(Self::map_error)?;

        debug!(
            voice_id = %speech.voice_id,
            duration_secs = ?speech.duration_secs,
            "Synthesis complete"
        );

        AudioRef::new(speech.audio_url).map_err(|_| SynthesisError::NoAudioReturned)
    }

    fn is_available(&self) -> bool {
        self.provider.is_some()
    }
}

#[cfg(test)]
mod tests {
    use ai_speech::{SynthesizedSpeech, Transcription};
    use parking_lot::Mutex;

    use super::*;

    struct FakeStt {
        result: Result<Transcription, SpeechError>,
        seen_format: Mutex<Option<AudioFormat>>,
    }

    impl FakeStt {
        fn returning(result: Result<Transcription, SpeechError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                seen_format: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl SpeechToText for FakeStt {
        async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError> {
            *self.seen_format.lock() = Some(audio.format());
            self.result.clone()
        }

        fn model_name(&self) -> &str {
            "fake-stt"
        }
    }

    struct FakeTts {
        result: Result<SynthesizedSpeech, SpeechError>,
        seen_voice: Mutex<Option<String>>,
    }

    #[async_trait]
    impl TextToSpeech for FakeTts {
        async fn synthesize(
            &self,
            _text: &str,
            voice: Option<&str>,
        ) -> Result<SynthesizedSpeech, SpeechError> {
            *self.seen_voice.lock() = voice.map(ToString::to_string);
            self.result.clone()
        }

        fn default_voice(&self) -> &str {
            "fake-voice"
        }
    }

    fn speech(url: &str) -> SynthesizedSpeech {
        SynthesizedSpeech {
            audio_url: url.to_string(),
            voice_id: "fake-voice".to_string(),
            duration_secs: Some(1.5),
        }
    }

    #[test]
    fn unconfigured_keys_make_adapters_unavailable() {
        let config = SpeechConfig::default();
        assert!(
            !SpeechTranscriptionAdapter::from_config(&config)
                .unwrap()
                .is_available()
        );
        assert!(
            !SpeechSynthesisAdapter::from_config(&config)
                .unwrap()
                .is_available()
        );
    }

    #[test]
    fn configured_keys_make_adapters_available() {
        let config = SpeechConfig {
            openai_api_key: Some("sk-test".to_string()),
            murf_api_key: Some("murf-test".to_string()),
            ..Default::default()
        };
        assert!(
            SpeechTranscriptionAdapter::from_config(&config)
                .unwrap()
                .is_available()
        );
        assert!(
            SpeechSynthesisAdapter::from_config(&config)
                .unwrap()
                .is_available()
        );
    }

    #[tokio::test]
    async fn transcribe_trims_text() {
        let stt = FakeStt::returning(Ok(Transcription::new("  hello world \n")));
        let adapter = SpeechTranscriptionAdapter::with_provider(stt);

        let transcript = adapter.transcribe(vec![1, 2, 3].into()).await.unwrap();
        assert_eq!(transcript.text, "hello world");
    }

    #[tokio::test]
    async fn transcribe_detects_format_from_content_type() {
        let stt = FakeStt::returning(Ok(Transcription::new("hi")));
        let adapter = SpeechTranscriptionAdapter::with_provider(stt.clone());

        let input = AudioInput::new(vec![1], Some("audio/ogg; codecs=opus".to_string()));
        adapter.transcribe(input).await.unwrap();
        assert_eq!(*stt.seen_format.lock(), Some(AudioFormat::Ogg));

        adapter.transcribe(vec![1].into()).await.unwrap();
        assert_eq!(*stt.seen_format.lock(), Some(AudioFormat::Webm));
    }

    /// Rejects formats Whisper cannot decode, like the real client
    struct FormatCheckingStt;

    #[async_trait]
    impl SpeechToText for FormatCheckingStt {
        async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError> {
            if !audio.format().is_whisper_supported() {
                return Err(SpeechError::InvalidAudio(format!(
                    "{:?} unsupported",
                    audio.format()
                )));
            }
            Ok(Transcription::new("hello from firefox"))
        }

        fn model_name(&self) -> &str {
            "format-checking-stt"
        }
    }

    #[tokio::test]
    async fn firefox_ogg_opus_upload_is_transcribed() {
        let adapter = SpeechTranscriptionAdapter::with_provider(Arc::new(FormatCheckingStt));

        let input = AudioInput::new(vec![1, 2, 3], Some("audio/ogg; codecs=opus".to_string()));
        let transcript = adapter.transcribe(input).await.unwrap();
        assert_eq!(transcript.text, "hello from firefox");
    }

    #[tokio::test]
    async fn blank_transcription_is_no_speech() {
        let stt = FakeStt::returning(Ok(Transcription::new("   ")));
        let adapter = SpeechTranscriptionAdapter::with_provider(stt);

        let result = adapter.transcribe(vec![1].into()).await;
        assert_eq!(result, Err(TranscriptionError::NoSpeech));
    }

    #[tokio::test]
    async fn provider_timeout_maps_to_timeout() {
        let stt = FakeStt::returning(Err(SpeechError::Timeout(500)));
        let adapter = SpeechTranscriptionAdapter::with_provider(stt);

        let result = adapter.transcribe(vec![1].into()).await;
        assert_eq!(result, Err(TranscriptionError::Timeout(500)));
    }

    #[tokio::test]
    async fn unavailable_transcriber_errors() {
        let adapter = SpeechTranscriptionAdapter::unavailable();
        let result = adapter.transcribe(vec![1].into()).await;
        assert!(matches!(result, Err(TranscriptionError::Provider(_))));
    }

    #[tokio::test]
    async fn synthesize_returns_audio_ref_and_passes_voice() {
        let tts = Arc::new(FakeTts {
            result: Ok(speech("https://cdn.example.com/reply.mp3")),
            seen_voice: Mutex::new(None),
        });
        let adapter = SpeechSynthesisAdapter::with_provider(tts.clone());

        let audio = adapter
            .synthesize("Hello".to_string(), Some("en-US-natalie".to_string()))
            .await
            .unwrap();
        assert_eq!(audio.as_str(), "https://cdn.example.com/reply.mp3");
        assert_eq!(tts.seen_voice.lock().as_deref(), Some("en-US-natalie"));
    }

    #[tokio::test]
    async fn blank_audio_url_is_no_audio() {
        let tts = Arc::new(FakeTts {
            result: Ok(speech("  ")),
            seen_voice: Mutex::new(None),
        });
        let adapter = SpeechSynthesisAdapter::with_provider(tts);

        let result = adapter.synthesize("Hello".to_string(), None).await;
        assert_eq!(result, Err(SynthesisError::NoAudioReturned));
    }

    #[tokio::test]
    async fn synthesis_errors_are_mapped() {
        let tts = Arc::new(FakeTts {
            result: Err(SpeechError::NoAudioReturned),
            seen_voice: Mutex::new(None),
        });
        let adapter = SpeechSynthesisAdapter::with_provider(tts);
        assert_eq!(
            adapter.synthesize("Hello".to_string(), None).await,
            Err(SynthesisError::NoAudioReturned)
        );

        let tts = Arc::new(FakeTts {
            result: Err(SpeechError::RateLimited),
            seen_voice: Mutex::new(None),
        });
        let adapter = SpeechSynthesisAdapter::with_provider(tts);
        assert!(matches!(
            adapter.synthesize("Hello".to_string(), None).await,
            Err(SynthesisError::Provider(_))
        ));
    }
}
