//! Conversation message entity

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Role of the message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message spoken by the user (transcribed)
    User,
    /// Message generated by the language model
    Assistant,
}

impl MessageRole {
    /// Label used when rendering the message into a prompt
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a session
///
/// Content is trimmed and guaranteed non-empty. Messages are immutable once
/// created; fields are exposed through accessors only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: MessageRole,
    content: String,
    #[serde(rename = "timestamp")]
    created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new message stamped with the current time
    pub fn new(role: MessageRole, content: impl AsRef<str>) -> Result<Self, DomainError> {
        Self::at(role, content, Utc::now())
    }

    /// Create a message with an explicit timestamp
    pub fn at(
        role: MessageRole,
        content: impl AsRef<str>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let content = content.as_ref().trim();
        if content.is_empty() {
            return Err(DomainError::EmptyMessage);
        }

        Ok(Self {
            role,
            content: content.to_string(),
            created_at,
        })
    }

    /// Create a new user message
    pub fn user(content: impl AsRef<str>) -> Result<Self, DomainError> {
        Self::new(MessageRole::User, content)
    }

    /// Create a new assistant message
    pub fn assistant(content: impl AsRef<str>) -> Result<Self, DomainError> {
        Self::new(MessageRole::Assistant, content)
    }

    pub const fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
