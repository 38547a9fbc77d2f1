//! Conversation orchestrator - Runs one voice turn end to end
//!
//! A turn moves through these stages, stopping at the first failure:
//! 1. Availability gate (all three providers configured)
//! 2. Input validation (non-empty audio)
//! 3. Transcription (STT)
//! 4. Context assembly from the session store
//! 5. Response generation (LLM)
//! 6. Commit of the user/assistant exchange
//! 7. Synthesis (TTS), whose failure only degrades the turn
//!
//! Nothing is written to the session store before step 6. Every failure comes
//! back as a [`PipelineOutcome::Failure`] carrying a fallback message and, when
//! synthesis works, a spoken version of it.

use std::{
    any::Any,
    fmt,
    panic::AssertUnwindSafe,
    sync::Arc,
    time::{Duration, Instant},
};

use domain::{
    AudioRef, ErrorKind, Message, PipelineOutcome, ServiceAvailability, SessionId,
};
use futures::FutureExt;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    error::{GenerationError, SynthesisError, TranscriptionError},
    ports::{AudioInput, GenerationPort, SessionStore, SynthesisPort, TranscriptionPort},
};

/// Default number of prior messages handed to the language model
pub const DEFAULT_CONTEXT_MESSAGES: usize = 10;

/// Default deadline for each provider call
pub const DEFAULT_PORT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// How many recent messages form the generation context
    pub context_messages: usize,
    /// Deadline applied to every transcription, generation and synthesis call
    pub port_timeout: Duration,
    /// Voice override passed to the synthesis port
    pub voice_id: Option<String>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            context_messages: DEFAULT_CONTEXT_MESSAGES,
            port_timeout: DEFAULT_PORT_TIMEOUT,
            voice_id: None,
        }
    }
}

/// A turn that stopped early
#[derive(Debug)]
struct StageFailure {
    kind: ErrorKind,
    user_text: Option<String>,
    fallback_text: String,
}

impl StageFailure {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            user_text: None,
            fallback_text: kind.fallback_message().to_string(),
        }
    }

    fn with_user_text(mut self, user_text: &str) -> Self {
        self.user_text = Some(user_text.to_string());
        self
    }

    fn with_fallback_text(mut self, text: String) -> Self {
        self.fallback_text = text;
        self
    }
}

impl From<TranscriptionError> for StageFailure {
    fn from(err: TranscriptionError) -> Self {
        match err {
            TranscriptionError::NoSpeech => Self::new(ErrorKind::NoSpeechDetected),
            TranscriptionError::Provider(_) | TranscriptionError::Timeout(_) => {
                Self::new(ErrorKind::TranscriptionFailed)
            },
        }
    }
}

/// Orchestrates a single voice turn across the three provider ports
pub struct ConversationOrchestrator {
    transcriber: Arc<dyn TranscriptionPort>,
    generator: Arc<dyn GenerationPort>,
    synthesizer: Arc<dyn SynthesisPort>,
    store: Arc<dyn SessionStore>,
    config: OrchestratorConfig,
}

impl fmt::Debug for ConversationOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationOrchestrator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ConversationOrchestrator {
    pub fn new(
        transcriber: Arc<dyn TranscriptionPort>,
        generator: Arc<dyn GenerationPort>,
        synthesizer: Arc<dyn SynthesisPort>,
        store: Arc<dyn SessionStore>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            transcriber,
            generator,
            synthesizer,
            store,
            config,
        }
    }

    pub const fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Which providers are currently configured
    pub fn availability(&self) -> ServiceAvailability {
        ServiceAvailability {
            tts: self.synthesizer.is_available(),
            stt: self.transcriber.is_available(),
            llm: self.generator.is_available(),
        }
    }

    /// Model the generation port is configured with
    pub fn current_model(&self) -> String {
        self.generator.current_model()
    }

    /// Full retained history of a session, oldest first
    pub fn history(&self, session_id: &SessionId) -> Vec<Message> {
        self.store.history(session_id)
    }

    /// Drop a session's history; false if it did not exist
    pub fn clear_session(&self, session_id: &SessionId) -> bool {
        let cleared = self.store.clear(session_id);
        if cleared {
            info!(session_id = %session_id, "Session cleared");
        }
        cleared
    }

    /// Run one turn. Never fails: errors and panics become
    /// [`PipelineOutcome::Failure`].
    #[instrument(skip(self, session_id, audio), fields(session_id = %session_id))]
    pub async fn handle_turn(
        &self,
        session_id: &SessionId,
        audio: impl Into<AudioInput> + Send,
    ) -> PipelineOutcome {
        let started = Instant::now();
        let result = AssertUnwindSafe(self.run_turn(session_id, audio.into()))
            .catch_unwind()
            .await;

        let failure = match result {
            Ok(Ok(outcome)) => {
                info!(
                    status = outcome.status(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Turn completed"
                );
                return outcome;
            },
            Ok(Err(failure)) => failure,
            Err(payload) => {
                error!(panic = panic_message(payload.as_ref()), "Turn panicked");
                StageFailure::new(ErrorKind::UnexpectedError)
            },
        };

        warn!(
            stage = %failure.kind.stage(),
            error_kind = %failure.kind,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Turn failed"
        );
        self.fail(failure).await
    }

    async fn run_turn(
        &self,
        session_id: &SessionId,
        audio: AudioInput,
    ) -> Result<PipelineOutcome, StageFailure> {
        let availability = self.availability();
        if !availability.all_available() {
            let missing = availability.missing().join(", ");
            return Err(
                StageFailure::new(ErrorKind::ServiceUnavailable).with_fallback_text(format!(
                    "Required services unavailable: {missing}. Please check your API keys."
                )),
            );
        }

        if audio.is_empty() {
            return Err(StageFailure::new(ErrorKind::EmptyAudio));
        }
        debug!(audio_bytes = audio.len(), content_type = ?audio.content_type, "Audio received");

        let user_text = self.transcribe(audio).await?;
        let context = self
            .store
            .recent_context(session_id, self.config.context_messages);
        let assistant_text = self.generate(&user_text, context).await?;

        let message_count = self
            .store
            .append_exchange(session_id, &user_text, &assistant_text)
            .map_err(|e| {
                error!(error = %e, "Failed to commit exchange");
                StageFailure::new(ErrorKind::UnexpectedError)
            })?;
        debug!(message_count, "Exchange committed");

        // The exchange is committed; from here on a failure only degrades the turn
        let synthesized = AssertUnwindSafe(self.synthesize(assistant_text.clone()))
            .catch_unwind()
            .await;
        match synthesized {
            Ok(Ok(audio_ref)) => Ok(PipelineOutcome::Success {
                user_text,
                assistant_text,
                audio_ref,
            }),
            Ok(Err(e)) => {
                warn!(error = %e, "Synthesis failed, returning text only");
                Ok(Self::text_only(user_text, assistant_text))
            },
            Err(payload) => {
                error!(
                    panic = panic_message(payload.as_ref()),
                    "Synthesis panicked, returning text only"
                );
                Ok(Self::text_only(user_text, assistant_text))
            },
        }
    }

    fn text_only(user_text: String, assistant_text: String) -> PipelineOutcome {
        PipelineOutcome::PartialSuccess {
            user_text,
            assistant_text,
            reason: ErrorKind::SynthesisFailed,
        }
    }

    async fn transcribe(&self, audio: AudioInput) -> Result<String, StageFailure> {
        let transcript = tokio::time::timeout(
            self.config.port_timeout,
            self.transcriber.transcribe(audio),
        )
        .await
        .unwrap_or_else(|_| Err(TranscriptionError::Timeout(self.timeout_ms())))
        .map_err(|e| {
            warn!(error = %e, "Transcription failed");
            StageFailure::from(e)
        })?;

        let text = transcript.text.trim();
        if text.is_empty() {
            return Err(StageFailure::new(ErrorKind::NoSpeechDetected));
        }

        info!(
            chars = text.len(),
            confidence = ?transcript.confidence,
            "Transcribed user audio"
        );
        Ok(text.to_string())
    }

    async fn generate(
        &self,
        user_text: &str,
        context: Vec<Message>,
    ) -> Result<String, StageFailure> {
        let llm_failure = |kind| StageFailure::new(kind).with_user_text(user_text);

        debug!(context_messages = context.len(), "Generating reply");
        let result = tokio::time::timeout(
            self.config.port_timeout,
            self.generator.generate(user_text.to_string(), context),
        )
        .await
        .unwrap_or_else(|_| Err(GenerationError::Timeout(self.timeout_ms())))
        .map_err(|e| {
            warn!(error = %e, "Generation failed");
            match e {
                GenerationError::EmptyResponse => llm_failure(ErrorKind::EmptyLlmResponse),
                GenerationError::Provider(_) | GenerationError::Timeout(_) => {
                    llm_failure(ErrorKind::LlmError)
                },
            }
        })?;

        let text = result.text.trim();
        if text.is_empty() {
            return Err(llm_failure(ErrorKind::EmptyLlmResponse));
        }

        info!(
            model = %result.model,
            latency_ms = result.latency_ms,
            "Generated reply"
        );
        Ok(text.to_string())
    }

    async fn synthesize(&self, text: String) -> Result<AudioRef, SynthesisError> {
        tokio::time::timeout(
            self.config.port_timeout,
            self.synthesizer
                .synthesize(text, self.config.voice_id.clone()),
        )
        .await
        .unwrap_or_else(|_| Err(SynthesisError::Timeout(self.timeout_ms())))
    }

    async fn fail(&self, failure: StageFailure) -> PipelineOutcome {
        let fallback_audio_ref = self.fallback_audio(&failure.fallback_text).await;
        PipelineOutcome::Failure {
            stage: failure.kind.stage(),
            error_kind: failure.kind,
            user_text: failure.user_text,
            fallback_text: failure.fallback_text,
            fallback_audio_ref,
        }
    }

    /// Best-effort spoken fallback; any error is logged and dropped
    async fn fallback_audio(&self, text: &str) -> Option<AudioRef> {
        if !self.synthesizer.is_available() {
            return None;
        }

        match AssertUnwindSafe(self.synthesize(text.to_string()))
            .catch_unwind()
            .await
        {
            Ok(Ok(audio_ref)) => Some(audio_ref),
            Ok(Err(e)) => {
                warn!(error = %e, "Fallback audio synthesis failed");
                None
            },
            Err(payload) => {
                warn!(
                    panic = panic_message(payload.as_ref()),
                    "Fallback audio synthesis panicked"
                );
                None
            },
        }
    }

    fn timeout_ms(&self) -> u64 {
        self.config.port_timeout.as_millis() as u64
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
