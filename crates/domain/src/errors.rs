//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Session identifier is blank, too long, or contains unsupported characters
    #[error("Invalid session id: {0}")]
    InvalidSessionId(String),

    /// Message content is empty after trimming
    #[error("Message content cannot be empty")]
    EmptyMessage,

    /// Audio reference is empty
    #[error("Invalid audio reference: {0}")]
    InvalidAudioRef(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}
