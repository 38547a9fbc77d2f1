//! AI Speech - Speech-to-Text and Text-to-Speech clients
//!
//! Provides traits and implementations for speech processing:
//! - `SpeechToText` - Transcribe audio to text (STT)
//! - `TextToSpeech` - Synthesize speech from text (TTS)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Supported Providers
//!
//! - OpenAI Whisper (STT)
//! - Murf (TTS), which returns a URL to hosted audio
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{AudioData, AudioFormat, MurfSpeechProvider, OpenAISpeechProvider};
//!
//! let stt = OpenAISpeechProvider::new(config.clone())?;
//! let transcription = stt.transcribe(AudioData::new(bytes, AudioFormat::Webm)).await?;
//!
//! let tts = MurfSpeechProvider::new(config)?;
//! let speech = tts.synthesize(&transcription.text, None).await?;
//! println!("Audio at {}", speech.audio_url);
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::murf::MurfSpeechProvider;
pub use providers::openai::OpenAISpeechProvider;
pub use types::{AudioData, AudioFormat, SynthesizedSpeech, Transcription};
