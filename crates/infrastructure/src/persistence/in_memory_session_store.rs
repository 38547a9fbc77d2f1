//! In-memory session store
//!
//! Implements the SessionStore port with a process-local map. History does not
//! survive a restart.

use std::collections::HashMap;
use std::sync::Arc;

use application::{error::ApplicationError, ports::SessionStore};
use domain::{Message, MessageRole, Session, SessionId};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, instrument};

type SessionHandle = Arc<Mutex<Session>>;

/// Process-local map of bounded sessions
///
/// The map lock is held only to find or create a session handle. All reads
/// and writes of one session happen under that session's own mutex, so turns
/// on different sessions never block each other and an exchange is never
/// interleaved with another writer on the same session.
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
    max_messages: usize,
}

impl InMemorySessionStore {
    /// Create a store whose sessions keep at most `max_messages` messages
    pub fn new(max_messages: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_messages: max_messages.max(1),
        }
    }

    fn get(&self, session_id: &SessionId) -> Option<SessionHandle> {
        self.sessions.read().get(session_id).map(Arc::clone)
    }

    fn get_or_create(&self, session_id: &SessionId) -> SessionHandle {
        if let Some(handle) = self.get(session_id) {
            return handle;
        }

        let mut sessions = self.sessions.write();
        Arc::clone(sessions.entry(session_id.clone()).or_insert_with(|| {
            debug!(session_id = %session_id, "Creating session");
            Arc::new(Mutex::new(Session::new(
                session_id.clone(),
                self.max_messages,
            )))
        }))
    }

    fn push_all(&self, session_id: &SessionId, messages: Vec<Message>) -> usize {
        let handle = self.get_or_create(session_id);
        let mut session = handle.lock();

        let evicted: usize = messages.into_iter().map(|m| session.push(m)).sum();
        if evicted > 0 {
            debug!(session_id = %session.id(), evicted, "Evicted oldest messages");
        }
        session.message_count()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(domain::entities::DEFAULT_MAX_MESSAGES)
    }
}

impl SessionStore for InMemorySessionStore {
    #[instrument(skip(self, content), fields(session_id = %session_id, role = %role))]
    fn append(
        &self,
        session_id: &SessionId,
        role: MessageRole,
        content: &str,
    ) -> Result<usize, ApplicationError> {
        let message = Message::new(role, content)?;
        Ok(self.push_all(session_id, vec![message]))
    }

    #[instrument(skip(self, user_text, assistant_text), fields(session_id = %session_id))]
    fn append_exchange(
        &self,
        session_id: &SessionId,
        user_text: &str,
        assistant_text: &str,
    ) -> Result<usize, ApplicationError> {
        let user = Message::user(user_text)?;
        let assistant = Message::assistant(assistant_text)?;
        Ok(self.push_all(session_id, vec![user, assistant]))
    }

    fn recent_context(&self, session_id: &SessionId, max_messages: usize) -> Vec<Message> {
        self.get(session_id)
            .map(|handle| handle.lock().recent(max_messages))
            .unwrap_or_default()
    }

    fn history(&self, session_id: &SessionId) -> Vec<Message> {
        self.get(session_id)
            .map(|handle| handle.lock().messages().cloned().collect())
            .unwrap_or_default()
    }

    #[instrument(skip(self), fields(session_id = %session_id))]
    fn clear(&self, session_id: &SessionId) -> bool {
        let removed = self.sessions.write().remove(session_id).is_some();
        if removed {
            debug!("Session cleared");
        }
        removed
    }

    fn message_count(&self, session_id: &SessionId) -> usize {
        self.get(session_id)
            .map_or(0, |handle| handle.lock().message_count())
    }
}

#[cfg(test)]
mod tests {
    use domain::DomainError;

    use super::*;

    fn sid(s: &str) -> SessionId {
        SessionId::parse(s).unwrap()
    }

    fn exists(store: &InMemorySessionStore, id: &SessionId) -> bool {
        store.sessions.read().contains_key(id)
    }

    fn session_count(store: &InMemorySessionStore) -> usize {
        store.sessions.read().len()
    }

    #[test]
    fn append_creates_session_on_first_use() {
        let store = InMemorySessionStore::new(10);
        let id = sid("first");
        assert!(!exists(&store, &id));

        let count = store.append(&id, MessageRole::User, "Hello").unwrap();
        assert_eq!(count, 1);
        assert!(exists(&store, &id));
        assert_eq!(session_count(&store), 1);
    }

    #[test]
    fn append_rejects_blank_content() {
        let store = InMemorySessionStore::new(10);
        let id = sid("blank");

        let result = store.append(&id, MessageRole::User, "   ");
        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::EmptyMessage))
        ));
        assert!(!exists(&store, &id));
    }

    #[test]
    fn exchange_is_all_or_nothing() {
        let store = InMemorySessionStore::new(10);
        let id = sid("exchange");

        assert!(store.append_exchange(&id, "Hi", "").is_err());
        assert_eq!(store.message_count(&id), 0);

        assert_eq!(store.append_exchange(&id, "Hi", "Hello!").unwrap(), 2);
        let roles: Vec<_> = store.history(&id).iter().map(Message::role).collect();
        assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant]);
    }

    #[test]
    fn oldest_messages_are_evicted() {
        let store = InMemorySessionStore::new(4);
        let id = sid("evict");

        for n in 0..3 {
            store
                .append_exchange(&id, &format!("question {n}"), &format!("answer {n}"))
                .unwrap();
        }

        let history = store.history(&id);
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].content(), "question 1");
        assert_eq!(history[3].content(), "answer 2");
    }

    #[test]
    fn recent_context_returns_tail() {
        let store = InMemorySessionStore::new(50);
        let id = sid("recent");
        for n in 0..6 {
            store
                .append(&id, MessageRole::User, &format!("message {n}"))
                .unwrap();
        }

        let context = store.recent_context(&id, 2);
        let contents: Vec<_> = context.iter().map(Message::content).collect();
        assert_eq!(contents, vec!["message 4", "message 5"]);
    }

    #[test]
    fn unknown_session_reads_are_empty() {
        let store = InMemorySessionStore::default();
        let id = sid("ghost");
        assert!(store.recent_context(&id, 10).is_empty());
        assert!(store.history(&id).is_empty());
        assert_eq!(store.message_count(&id), 0);
        assert!(!store.clear(&id));
    }

    #[test]
    fn clear_removes_session() {
        let store = InMemorySessionStore::new(10);
        let id = sid("clear-me");
        store.append_exchange(&id, "Hi", "Hello!").unwrap();

        assert!(store.clear(&id));
        assert!(!exists(&store, &id));
        assert_eq!(session_count(&store), 0);
    }

    #[test]
    fn sessions_are_isolated() {
        let store = InMemorySessionStore::new(10);
        store.append(&sid("a"), MessageRole::User, "for a").unwrap();
        store.append(&sid("b"), MessageRole::User, "for b").unwrap();

        assert_eq!(store.history(&sid("a"))[0].content(), "for a");
        assert_eq!(store.history(&sid("b"))[0].content(), "for b");
        assert_eq!(session_count(&store), 2);
    }

    #[test]
    fn zero_cap_is_raised_to_one() {
        let store = InMemorySessionStore::new(0);
        let id = sid("tiny");
        store.append(&id, MessageRole::User, "first").unwrap();
        assert_eq!(store.append(&id, MessageRole::User, "second").unwrap(), 1);
        assert_eq!(store.history(&id)[0].content(), "second");
    }

    #[test]
    fn concurrent_exchanges_stay_paired() {
        let store = Arc::new(InMemorySessionStore::new(1000));
        let id = sid("concurrent");

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                let id = id.clone();
                std::thread::spawn(move || {
                    for n in 0..25 {
                        store
                            .append_exchange(&id, &format!("q{t}-{n}"), &format!("a{t}-{n}"))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let history = store.history(&id);
        assert_eq!(history.len(), 400);
        for pair in history.chunks(2) {
            assert_eq!(pair[0].role(), MessageRole::User);
            assert_eq!(pair[1].role(), MessageRole::Assistant);
            assert_eq!(&pair[0].content()[1..], &pair[1].content()[1..]);
        }
    }
}
