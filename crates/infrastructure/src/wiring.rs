//! Composition of the production orchestrator from configuration

use std::sync::Arc;

use application::{ApplicationError, ConversationOrchestrator};
use tracing::{info, warn};

use crate::{
    AppConfig, GenerationAdapter, InMemorySessionStore, SpeechSynthesisAdapter,
    SpeechTranscriptionAdapter,
};

/// Build the orchestrator with provider adapters and a fresh session store
///
/// Providers without credentials are wired as unavailable; turns then fail at
/// the preflight stage instead of the process refusing to start.
///
/// # Errors
///
/// Returns an error only if a configured provider client cannot be built.
pub fn build_orchestrator(
    config: &AppConfig,
) -> Result<ConversationOrchestrator, ApplicationError> {
    let transcriber = SpeechTranscriptionAdapter::from_config(&config.speech)?;
    let synthesizer = SpeechSynthesisAdapter::from_config(&config.speech)?;
    let generator = GenerationAdapter::from_config(&config.inference)?;
    let store = InMemorySessionStore::new(config.session.max_messages);

    let orchestrator = ConversationOrchestrator::new(
        Arc::new(transcriber),
        Arc::new(generator),
        Arc::new(synthesizer),
        Arc::new(store),
        config.session.orchestrator_config(),
    );

    let availability = orchestrator.availability();
    info!(
        tts = availability.tts,
        stt = availability.stt,
        llm = availability.llm,
        model = %config.inference.default_model,
        max_messages = config.session.max_messages,
        "Voice pipeline ready"
    );
    if !availability.all_available() {
        warn!(
            missing = %availability.missing().join(", "),
            "Some services are unavailable; turns will fail until their API keys are configured"
        );
    }

    Ok(orchestrator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_without_credentials() {
        let orchestrator = build_orchestrator(&AppConfig::default()).unwrap();
        let availability = orchestrator.availability();
        assert!(!availability.tts);
        assert!(!availability.stt);
        assert!(!availability.llm);
    }

    #[test]
    fn credentials_enable_services() {
        let mut config = AppConfig::default();
        config.speech.openai_api_key = Some("sk-test".to_string());
        config.inference.api_key = Some("gemini-test".to_string());

        let availability = build_orchestrator(&config).unwrap().availability();
        assert!(availability.stt);
        assert!(availability.llm);
        assert!(!availability.tts);
    }
}
