//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: provider adapters for
//! speech and language models, the in-memory session store, configuration
//! loading and telemetry setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;
mod wiring;

pub use adapters::*;
pub use config::{AppConfig, LogFormat, ServerConfig, SessionConfig};
pub use persistence::InMemorySessionStore;
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
pub use wiring::build_orchestrator;
