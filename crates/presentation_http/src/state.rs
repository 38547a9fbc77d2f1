//! Application state shared across handlers

use std::sync::Arc;

use application::ConversationOrchestrator;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Voice turn pipeline and session history
    pub orchestrator: Arc<ConversationOrchestrator>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(orchestrator: ConversationOrchestrator, config: AppConfig) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            config: Arc::new(config),
        }
    }
}
