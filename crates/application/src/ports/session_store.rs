//! Session storage port
//!
//! Defines the interface for keeping bounded per-session message logs.

use domain::{Message, MessageRole, SessionId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for session history
///
/// Calls are synchronous: implementations hold a lock only for the duration of
/// the call and never across an await point.
#[cfg_attr(test, automock)]
pub trait SessionStore: Send + Sync {
    /// Append one message, creating the session on first use
    ///
    /// Returns the session's message count after eviction.
    fn append(
        &self,
        session_id: &SessionId,
        role: MessageRole,
        content: &str,
    ) -> Result<usize, ApplicationError>;

    /// Append a user message and its assistant reply as one unit
    ///
    /// Both messages are validated before either is stored. Returns the
    /// session's message count after eviction.
    fn append_exchange(
        &self,
        session_id: &SessionId,
        user_text: &str,
        assistant_text: &str,
    ) -> Result<usize, ApplicationError>;

    /// The last `max_messages` messages, oldest first; empty for unknown ids
    fn recent_context(&self, session_id: &SessionId, max_messages: usize) -> Vec<Message>;

    /// The full retained log, oldest first
    fn history(&self, session_id: &SessionId) -> Vec<Message>;

    /// Remove a session; true if it existed
    fn clear(&self, session_id: &SessionId) -> bool;

    fn message_count(&self, session_id: &SessionId) -> usize;
}
