//! Session entity - A bounded, chronological message log

use std::collections::VecDeque;

use super::Message;
use crate::value_objects::SessionId;

/// Default number of messages retained per session
pub const DEFAULT_MAX_MESSAGES: usize = 50;

/// A conversation session holding at most `max_messages` messages
///
/// Messages are kept in insertion order, which is chronological order.
/// Appending beyond the cap evicts from the front (oldest first).
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    messages: VecDeque<Message>,
    max_messages: usize,
}

impl Session {
    /// Create an empty session. A cap of zero is raised to one.
    pub fn new(id: SessionId, max_messages: usize) -> Self {
        let max_messages = max_messages.max(1);
        Self {
            id,
            messages: VecDeque::with_capacity(max_messages.min(DEFAULT_MAX_MESSAGES)),
            max_messages,
        }
    }

    /// Append a message, returning how many old messages were evicted
    pub fn push(&mut self, message: Message) -> usize {
        self.messages.push_back(message);

        let mut evicted = 0;
        while self.messages.len() > self.max_messages {
            self.messages.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// The last `limit` messages, oldest first
    pub fn recent(&self, limit: usize) -> Vec<Message> {
        let skip = self.messages.len().saturating_sub(limit);
        self.messages.iter().skip(skip).cloned().collect()
    }

    /// All retained messages, oldest first
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub const fn id(&self) -> &SessionId {
        &self.id
    }
}
