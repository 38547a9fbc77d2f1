//! Session identifier for tracking conversations

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Maximum accepted length of a caller-supplied session id
pub const MAX_SESSION_ID_LEN: usize = 128;

/// An opaque session identifier
///
/// Either supplied by the caller (URL path segment) or generated server-side
/// for stateless calls. Allowed characters: ASCII alphanumerics, `_`, `-`, `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh id of the form `session_<YYYYmmdd_HHMMSS>_<8 hex>`
    pub fn generate() -> Self {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let unique = Uuid::new_v4().simple().to_string();
        Self(format!("session_{timestamp}_{}", &unique[..8]))
    }

    /// Parse a caller-supplied session id
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::InvalidSessionId("must not be blank".to_string()));
        }
        if s.len() > MAX_SESSION_ID_LEN {
            return Err(DomainError::InvalidSessionId(format!(
                "longer than {MAX_SESSION_ID_LEN} characters"
            )));
        }
        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
        {
            return Err(DomainError::InvalidSessionId(format!(
                "unsupported character {c:?}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}
