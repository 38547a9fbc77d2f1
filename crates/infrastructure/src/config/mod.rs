//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `session`: history bounds and pipeline timeouts
//!
//! Provider settings reuse [`SpeechConfig`] and [`InferenceConfig`] from the
//! client crates.

mod server;
mod session;

use ai_core::InferenceConfig;
use ai_speech::SpeechConfig;
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

pub use server::{LogFormat, ServerConfig};
pub use session::SessionConfig;

/// Prefix for environment overrides, e.g. `VOICE_GATEWAY__SERVER__PORT`
pub const ENV_PREFIX: &str = "VOICE_GATEWAY";

/// Separator between the prefix and nested keys in environment overrides
pub const ENV_SEPARATOR: &str = "__";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Transcription and synthesis providers
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Language model provider
    #[serde(default)]
    pub inference: InferenceConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `.env`, an optional `config.toml` and the environment
    ///
    /// Later sources override earlier ones. Missing provider keys are not an
    /// error; the affected ports report themselves unavailable.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// Parse configuration from TOML text, applying the same defaults as [`load`](Self::load)
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self, config::ConfigError> {
        self.session
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("session: {e}")))?;
        Ok(self)
    }
}
