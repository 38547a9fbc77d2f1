//! Synthesis port - Interface for text-to-speech

use async_trait::async_trait;
use domain::AudioRef;
#[cfg(test)]
use mockall::automock;

use crate::error::SynthesisError;

/// Port for speech synthesis
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SynthesisPort: Send + Sync {
    /// Synthesize `text`, returning where the audio can be fetched
    ///
    /// `voice_id` overrides the provider's configured default voice.
    async fn synthesize(
        &self,
        text: String,
        voice_id: Option<String>,
    ) -> Result<AudioRef, SynthesisError>;

    /// True iff the provider's credentials are configured
    fn is_available(&self) -> bool;
}
