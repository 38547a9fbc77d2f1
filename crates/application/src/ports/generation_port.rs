//! Generation port - Interface for language-model responses

use async_trait::async_trait;
use domain::Message;
#[cfg(test)]
use mockall::automock;

use crate::error::GenerationError;

/// Result of a generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// Generated response text, untrimmed
    pub text: String,
    /// Model used for generation
    pub model: String,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// Port for response generation
///
/// Implementations build the provider prompt from the new user text and the
/// prior context (oldest first).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// Generate a reply to `user_text` given prior `context`
    async fn generate(
        &self,
        user_text: String,
        context: Vec<Message>,
    ) -> Result<GenerationResult, GenerationError>;

    /// True iff the provider's credentials are configured
    fn is_available(&self) -> bool;

    /// Name of the configured model
    fn current_model(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_generation_port_receives_context() {
        let mut mock = MockGenerationPort::new();
        mock.expect_generate()
            .withf(|text, context| text == "Hi" && context.len() == 1)
            .returning(|_, _| {
                Ok(GenerationResult {
                    text: "Hello!".to_string(),
                    model: "test-model".to_string(),
                    latency_ms: 5,
                })
            });

        let context = vec![Message::user("Earlier").unwrap()];
        let result = mock.generate("Hi".to_string(), context).await.unwrap();
        assert_eq!(result.text, "Hello!");
    }

    #[tokio::test]
    async fn mock_generation_port_error() {
        let mut mock = MockGenerationPort::new();
        mock.expect_generate()
            .returning(|_, _| Err(GenerationError::EmptyResponse));

        let result = mock.generate("Hi".to_string(), Vec::new()).await;
        assert_eq!(result, Err(GenerationError::EmptyResponse));
    }
}
