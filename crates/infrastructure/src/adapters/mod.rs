//! Infrastructure adapters
//!
//! Adapters connect application ports to the provider clients.

mod generation_adapter;
mod speech_adapter;

pub use generation_adapter::GenerationAdapter;
pub use speech_adapter::{SpeechSynthesisAdapter, SpeechTranscriptionAdapter};
