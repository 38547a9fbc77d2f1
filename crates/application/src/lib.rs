//! Application layer - Use cases and orchestration
//!
//! Contains the conversation orchestrator, prompt rendering, and the port
//! definitions that infrastructure adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, GenerationError, SynthesisError, TranscriptionError};
pub use ports::*;
pub use services::*;
