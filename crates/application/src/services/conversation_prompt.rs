//! Conversation prompt rendering
//!
//! Turns the recent session context and the new user utterance into the single
//! text prompt sent to the language model.

use domain::Message;

/// Instruction placed at the top of every prompt
pub const ASSISTANT_PREAMBLE: &str = "You are a helpful AI assistant having a natural conversation. \
     Respond in a friendly, conversational manner. Keep responses concise but helpful.";

/// Prompt for one generation call
#[derive(Debug, Clone, Copy)]
pub struct ConversationPrompt<'a> {
    context: &'a [Message],
    user_text: &'a str,
}

impl<'a> ConversationPrompt<'a> {
    /// `context` must be oldest first
    pub const fn new(context: &'a [Message], user_text: &'a str) -> Self {
        Self { context, user_text }
    }

    /// Render the prompt text
    ///
    /// ```text
    /// <preamble>
    ///
    /// Previous conversation:
    /// User: ...
    /// Assistant: ...
    ///
    /// User: <new text>
    /// Assistant:
    /// ```
    ///
    /// The "Previous conversation" block is omitted when there is no context.
    pub fn render(&self) -> String {
        let mut prompt = String::with_capacity(256);
        prompt.push_str(ASSISTANT_PREAMBLE);
        prompt.push_str("\n\n");

        if !self.context.is_empty() {
            prompt.push_str("Previous conversation:\n");
            for message in self.context {
                prompt.push_str(&format!(
                    "{}: {}\n",
                    message.role().label(),
                    message.content()
                ));
            }
        }

        prompt.push_str(&format!("\nUser: {}\nAssistant:", self.user_text));
        prompt
    }
}
