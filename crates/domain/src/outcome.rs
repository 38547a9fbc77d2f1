//! Turn outcomes and the failure taxonomy
//!
//! Every conversational turn ends in exactly one [`PipelineOutcome`]. Failures
//! are classified by the stage that produced them and an [`ErrorKind`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::AudioRef;

/// Pipeline stage at which a turn stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    /// Provider availability gate
    Preflight,
    /// Audio payload validation
    Input,
    /// Speech-to-text
    Stt,
    /// Response generation
    Llm,
    /// Text-to-speech
    Synthesis,
    /// Anything not attributable to a single stage
    Pipeline,
}

impl PipelineStage {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Preflight => "preflight",
            Self::Input => "input",
            Self::Stt => "stt",
            Self::Llm => "llm",
            Self::Synthesis => "synthesis",
            Self::Pipeline => "pipeline",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified reason a turn failed or degraded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ServiceUnavailable,
    EmptyAudio,
    TranscriptionFailed,
    NoSpeechDetected,
    LlmError,
    EmptyLlmResponse,
    /// Non-fatal; yields [`PipelineOutcome::PartialSuccess`]
    SynthesisFailed,
    UnexpectedError,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable => "service_unavailable",
            Self::EmptyAudio => "empty_audio",
            Self::TranscriptionFailed => "transcription_failed",
            Self::NoSpeechDetected => "no_speech_detected",
            Self::LlmError => "llm_error",
            Self::EmptyLlmResponse => "empty_llm_response",
            Self::SynthesisFailed => "synthesis_failed",
            Self::UnexpectedError => "unexpected_error",
        }
    }

    /// The stage this kind belongs to
    #[must_use]
    pub const fn stage(&self) -> PipelineStage {
        match self {
            Self::ServiceUnavailable => PipelineStage::Preflight,
            Self::EmptyAudio => PipelineStage::Input,
            Self::TranscriptionFailed | Self::NoSpeechDetected => PipelineStage::Stt,
            Self::LlmError | Self::EmptyLlmResponse => PipelineStage::Llm,
            Self::SynthesisFailed => PipelineStage::Synthesis,
            Self::UnexpectedError => PipelineStage::Pipeline,
        }
    }

    /// Human-readable message spoken back to the user
    #[must_use]
    pub const fn fallback_message(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable => {
                "Required services unavailable. Please check your API keys."
            },
            Self::EmptyAudio => "No audio detected. Please record a clear message and try again.",
            Self::TranscriptionFailed | Self::NoSpeechDetected => {
                "I couldn't understand what you said. Please speak clearly and try again."
            },
            Self::LlmError | Self::EmptyLlmResponse => {
                "My AI brain is having trouble right now. Please try again in a moment."
            },
            Self::SynthesisFailed => "I can respond but my voice synthesis isn't working right now.",
            Self::UnexpectedError => "Something unexpected happened. Please try again.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of one conversational turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// Text and voice both delivered
    Success {
        user_text: String,
        assistant_text: String,
        audio_ref: AudioRef,
    },
    /// Turn committed to history but synthesis failed
    PartialSuccess {
        user_text: String,
        assistant_text: String,
        reason: ErrorKind,
    },
    /// Turn aborted before commit, or an unexpected fault occurred
    #[serde(rename = "error")]
    Failure {
        stage: PipelineStage,
        error_kind: ErrorKind,
        /// Transcript, when the turn got past speech-to-text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_text: Option<String>,
        fallback_text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback_audio_ref: Option<AudioRef>,
    },
}

impl PipelineOutcome {
    /// Wire status: `success`, `partial_success` or `error`
    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::PartialSuccess { .. } => "partial_success",
            Self::Failure { .. } => "error",
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn user_text(&self) -> Option<&str> {
        match self {
            Self::Success { user_text, .. } | Self::PartialSuccess { user_text, .. } => {
                Some(user_text)
            },
            Self::Failure { user_text, .. } => user_text.as_deref(),
        }
    }

    pub fn assistant_text(&self) -> Option<&str> {
        match self {
            Self::Success { assistant_text, .. } | Self::PartialSuccess { assistant_text, .. } => {
                Some(assistant_text)
            },
            Self::Failure { .. } => None,
        }
    }

    /// Audio to play back: the reply on success, the fallback on failure
    pub const fn audio_ref(&self) -> Option<&AudioRef> {
        match self {
            Self::Success { audio_ref, .. } => Some(audio_ref),
            Self::PartialSuccess { .. } => None,
            Self::Failure {
                fallback_audio_ref, ..
            } => fallback_audio_ref.as_ref(),
        }
    }

    pub const fn stage(&self) -> Option<PipelineStage> {
        match self {
            Self::Success { .. } => None,
            Self::PartialSuccess { reason, .. } => Some(reason.stage()),
            Self::Failure { stage, .. } => Some(*stage),
        }
    }

    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::PartialSuccess { reason, .. } => Some(*reason),
            Self::Failure { error_kind, .. } => Some(*error_kind),
        }
    }

    /// Message to show or speak instead of a normal reply
    pub fn fallback_text(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::PartialSuccess { reason, .. } => Some(reason.fallback_message()),
            Self::Failure { fallback_text, .. } => Some(fallback_text),
        }
    }
}

/// Which external providers are configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAvailability {
    pub tts: bool,
    pub stt: bool,
    pub llm: bool,
}

impl ServiceAvailability {
    pub const fn all_available(&self) -> bool {
        self.tts && self.stt && self.llm
    }

    /// Names of the missing services, in `TTS, STT, LLM` order
    pub fn missing(&self) -> Vec<&'static str> {
        [("TTS", self.tts), ("STT", self.stt), ("LLM", self.llm)]
            .into_iter()
            .filter(|(_, available)| !available)
            .map(|(name, _)| name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_maps_to_its_stage() {
        assert_eq!(ErrorKind::ServiceUnavailable.stage(), PipelineStage::Preflight);
        assert_eq!(ErrorKind::EmptyAudio.stage(), PipelineStage::Input);
        assert_eq!(ErrorKind::TranscriptionFailed.stage(), PipelineStage::Stt);
        assert_eq!(ErrorKind::NoSpeechDetected.stage(), PipelineStage::Stt);
        assert_eq!(ErrorKind::LlmError.stage(), PipelineStage::Llm);
        assert_eq!(ErrorKind::EmptyLlmResponse.stage(), PipelineStage::Llm);
        assert_eq!(ErrorKind::SynthesisFailed.stage(), PipelineStage::Synthesis);
        assert_eq!(ErrorKind::UnexpectedError.stage(), PipelineStage::Pipeline);
    }

    #[test]
    fn kinds_serialize_snake_case() {
        let json = serde_json::to_string(&ErrorKind::EmptyLlmResponse).unwrap();
        assert_eq!(json, "\"empty_llm_response\"");
        assert_eq!(ErrorKind::NoSpeechDetected.to_string(), "no_speech_detected");
    }

    #[test]
    fn stages_serialize_lowercase() {
        let json = serde_json::to_string(&PipelineStage::Preflight).unwrap();
        assert_eq!(json, "\"preflight\"");
        assert_eq!(PipelineStage::Stt.to_string(), "stt");
    }

    #[test]
    fn every_kind_has_a_fallback_message() {
        for kind in [
            ErrorKind::ServiceUnavailable,
            ErrorKind::EmptyAudio,
            ErrorKind::TranscriptionFailed,
            ErrorKind::NoSpeechDetected,
            ErrorKind::LlmError,
            ErrorKind::EmptyLlmResponse,
            ErrorKind::SynthesisFailed,
            ErrorKind::UnexpectedError,
        ] {
            assert!(!kind.fallback_message().is_empty());
        }
    }

    #[test]
    fn success_accessors() {
        let outcome = PipelineOutcome::Success {
            user_text: "Hi".to_string(),
            assistant_text: "Hello!".to_string(),
            audio_ref: AudioRef::new("https://x/a.mp3").unwrap(),
        };
        assert_eq!(outcome.status(), "success");
        assert!(outcome.is_success());
        assert_eq!(outcome.user_text(), Some("Hi"));
        assert_eq!(outcome.assistant_text(), Some("Hello!"));
        assert!(outcome.stage().is_none());
        assert!(outcome.fallback_text().is_none());
    }

    #[test]
    fn partial_success_accessors() {
        let outcome = PipelineOutcome::PartialSuccess {
            user_text: "Hi".to_string(),
            assistant_text: "Hello!".to_string(),
            reason: ErrorKind::SynthesisFailed,
        };
        assert_eq!(outcome.status(), "partial_success");
        assert!(outcome.audio_ref().is_none());
        assert_eq!(outcome.stage(), Some(PipelineStage::Synthesis));
        assert_eq!(
            outcome.fallback_text(),
            Some("I can respond but my voice synthesis isn't working right now.")
        );
    }

    #[test]
    fn failure_serializes_with_status_tag() {
        let outcome = PipelineOutcome::Failure {
            stage: PipelineStage::Input,
            error_kind: ErrorKind::EmptyAudio,
            user_text: None,
            fallback_text: ErrorKind::EmptyAudio.fallback_message().to_string(),
            fallback_audio_ref: None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["stage"], "input");
        assert_eq!(json["error_kind"], "empty_audio");
        assert!(json.get("fallback_audio_ref").is_none());
        assert_eq!(outcome.status(), "error");
    }

    #[test]
    fn missing_services_in_fixed_order() {
        let availability = ServiceAvailability {
            tts: false,
            stt: true,
            llm: false,
        };
        assert!(!availability.all_available());
        assert_eq!(availability.missing(), vec!["TTS", "LLM"]);
    }

    #[test]
    fn nothing_missing_when_all_available() {
        let availability = ServiceAvailability {
            tts: true,
            stt: true,
            llm: true,
        };
        assert!(availability.all_available());
        assert!(availability.missing().is_empty());
    }
}
