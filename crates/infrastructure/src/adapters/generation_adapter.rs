//! Generation adapter - Implements GenerationPort using ai_core

use std::sync::Arc;
use std::time::Instant;

use ai_core::{
    GeminiInferenceEngine, InferenceConfig, InferenceEngine, InferenceError, InferenceRequest,
};
use application::{
    error::{ApplicationError, GenerationError},
    ports::{GenerationPort, GenerationResult},
    services::ConversationPrompt,
};
use async_trait::async_trait;
use domain::Message;
use tracing::{debug, info, instrument};

/// Adapter for language model inference
///
/// Renders the session context into a single prompt and forwards it to the
/// engine. Unavailable when no engine is configured.
#[derive(Clone)]
pub struct GenerationAdapter {
    engine: Option<Arc<dyn InferenceEngine>>,
    model: String,
}

impl std::fmt::Debug for GenerationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationAdapter")
            .field("available", &self.engine.is_some())
            .field("model", &self.model)
            .finish()
    }
}

impl GenerationAdapter {
    /// Build from configuration; a missing API key yields an unavailable adapter
    ///
    /// # Errors
    ///
    /// Returns an error if a key is present but the HTTP client cannot be built.
    pub fn from_config(config: &InferenceConfig) -> Result<Self, ApplicationError> {
        if !config.is_configured() {
            info!("No language model API key configured, LLM unavailable");
            return Ok(Self {
                engine: None,
                model: config.default_model.clone(),
            });
        }

        let engine = GeminiInferenceEngine::new(config.clone())
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_engine(Arc::new(engine)))
    }

    pub fn with_engine(engine: Arc<dyn InferenceEngine>) -> Self {
        let model = engine.default_model().to_string();
        Self {
            engine: Some(engine),
            model,
        }
    }

    fn map_error(e: InferenceError) -> GenerationError {
        match e {
            InferenceError::EmptyResponse => GenerationError::EmptyResponse,
            InferenceError::Timeout(ms) => GenerationError::Timeout(ms),
            other => GenerationError::Provider(other.to_string()),
        }
    }
}

#[async_trait]
impl GenerationPort for GenerationAdapter {
    #[instrument(skip(self, user_text, context), fields(text_len = user_text.len(), context_len = context.len()))]
    async fn generate(
        &self,
        user_text: String,
        context: Vec<Message>,
    ) -> Result<GenerationResult, GenerationError> {
        let Some(engine) = &self.engine else {
            return Err(GenerationError::Provider(
                "language model provider not configured".to_string(),
            ));
        };

        let start = Instant::now();
        let prompt = ConversationPrompt::new(&context, &user_text).render();

        let response = engine
            .generate(InferenceRequest::simple(prompt).with_model(self.model.clone()))
            .await
            .map_err(Self::map_error)?;

        let latency_ms = start.elapsed().as_millis() as u64;
        let text = response.content.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            latency_ms,
            "Generation completed"
        );

        Ok(GenerationResult {
            text: text.to_string(),
            model: response.model,
            latency_ms,
        })
    }

    fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    fn current_model(&self) -> String {
        self.model.clone()
    }
}
