//! Session and pipeline configuration

use std::time::Duration;

use application::services::{DEFAULT_CONTEXT_MESSAGES, DEFAULT_PORT_TIMEOUT, OrchestratorConfig};
use domain::entities::DEFAULT_MAX_MESSAGES;
use serde::{Deserialize, Serialize};

/// History bounds and per-call deadlines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Messages retained per session before FIFO eviction
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,

    /// Messages passed to the language model as context
    #[serde(default = "default_context_messages")]
    pub context_messages: usize,

    /// Deadline for each provider call
    #[serde(default = "default_port_timeout_ms")]
    pub port_timeout_ms: u64,

    /// Voice override for synthesis; the provider default when unset
    #[serde(default)]
    pub voice_id: Option<String>,
}

const fn default_max_messages() -> usize {
    DEFAULT_MAX_MESSAGES
}

const fn default_context_messages() -> usize {
    DEFAULT_CONTEXT_MESSAGES
}

const fn default_port_timeout_ms() -> u64 {
    DEFAULT_PORT_TIMEOUT.as_secs() * 1000
}

impl SessionConfig {
    pub const fn port_timeout(&self) -> Duration {
        Duration::from_millis(self.port_timeout_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port_timeout_ms == 0 {
            return Err("Port timeout must be greater than 0".to_string());
        }

        if self.max_messages == 0 {
            return Err("Max messages must be greater than 0".to_string());
        }

        Ok(())
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            context_messages: self.context_messages,
            port_timeout: self.port_timeout(),
            voice_id: self.voice_id.clone(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
            context_messages: default_context_messages(),
            port_timeout_ms: default_port_timeout_ms(),
            voice_id: None,
        }
    }
}
