//! Application services - Use case implementations

mod conversation_orchestrator;
mod conversation_prompt;

pub use conversation_orchestrator::{
    ConversationOrchestrator, DEFAULT_CONTEXT_MESSAGES, DEFAULT_PORT_TIMEOUT, OrchestratorConfig,
};
pub use conversation_prompt::{ASSISTANT_PREAMBLE, ConversationPrompt};
