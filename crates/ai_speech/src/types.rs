//! Types for speech processing
//!
//! Audio payloads and formats, transcriptions, and synthesized speech.

use serde::{Deserialize, Serialize};

/// Supported audio formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// WebM container, what browsers' MediaRecorder produces
    #[default]
    Webm,
    /// OGG container (typically with Opus codec)
    Ogg,
    /// Raw Opus stream
    Opus,
    Mp3,
    Wav,
    Flac,
    /// M4A/AAC format
    M4a,
}

impl AudioFormat {
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Webm => "audio/webm",
            Self::Ogg => "audio/ogg",
            Self::Opus => "audio/opus",
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Flac => "audio/flac",
            Self::M4a => "audio/m4a",
        }
    }

    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Ogg => "ogg",
            Self::Opus => "opus",
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::M4a => "m4a",
        }
    }

    /// Parse audio format from MIME type
    ///
    /// Parameters such as `; codecs=opus` are ignored; an `audio/ogg` upload is
    /// always an OGG container, whatever codec it carries.
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let base_mime = mime.split(';').next().unwrap_or(mime).trim();

        match base_mime.to_ascii_lowercase().as_str() {
            "audio/webm" | "video/webm" => Some(Self::Webm),
            "audio/opus" => Some(Self::Opus),
            "audio/ogg" => Some(Self::Ogg),
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/flac" | "audio/x-flac" => Some(Self::Flac),
            "audio/m4a" | "audio/mp4" | "audio/x-m4a" => Some(Self::M4a),
            _ => None,
        }
    }

    /// Format for an optional client-supplied MIME type, WebM when unknown
    #[must_use]
    pub fn from_mime_type_or_default(mime: Option<&str>) -> Self {
        mime.and_then(Self::from_mime_type).unwrap_or_default()
    }

    /// Check if OpenAI Whisper accepts this format directly
    #[must_use]
    pub const fn is_whisper_supported(&self) -> bool {
        matches!(
            self,
            Self::Webm | Self::Ogg | Self::Mp3 | Self::Wav | Self::Flac | Self::M4a
        )
    }

    /// Name used by the Murf API's `format` field
    #[must_use]
    pub const fn murf_name(&self) -> &'static str {
        match self {
            Self::Wav => "WAV",
            Self::Flac => "FLAC",
            Self::Ogg | Self::Opus => "OGG",
            Self::Webm | Self::Mp3 | Self::M4a => "MP3",
        }
    }
}

/// Container for audio data with its format
#[derive(Debug, Clone)]
pub struct AudioData {
    data: Vec<u8>,
    format: AudioFormat,
}

impl AudioData {
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Consume and return the raw audio bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Generate a filename with appropriate extension
    #[must_use]
    pub fn filename(&self, base: &str) -> String {
        format!("{}.{}", base, self.format.extension())
    }
}

/// Result of speech-to-text transcription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    /// Detected language (ISO 639-1 code)
    pub language: Option<String>,
    /// Confidence score (0.0 - 1.0)
    pub confidence: Option<f32>,
    /// Duration of the audio in milliseconds
    pub duration_ms: Option<u64>,
}

impl Transcription {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            confidence: None,
            duration_ms: None,
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub const fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Check if transcription has no words
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Speech hosted by the synthesis provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedSpeech {
    /// Where the generated audio can be downloaded
    pub audio_url: String,
    /// Voice the audio was rendered with
    pub voice_id: String,
    /// Length of the audio in seconds, when reported
    pub duration_secs: Option<f64>,
}
