//! Per-user session state and the session store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Which input the bot is currently waiting for from a user.
///
/// A session is a single-slot state machine: at most one value is awaited
/// at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Awaiting {
    /// Idle; no question is outstanding.
    #[default]
    None,

    /// A birth date for the profile-number flow.
    BirthdayForProfile,

    /// A full name for the expression-number flow.
    NameForExpression,

    /// A full name, first step of the report flow.
    NameForReport,

    /// A birth date, second step of the report flow.
    BirthdayForReport,
}

/// State of one user's conversation.
///
/// Ephemeral by design: sessions live in memory only, are rebuilt on
/// demand, and are lost on restart.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    /// The single outstanding question, if any.
    pub awaiting: Awaiting,

    /// Name collected in the first step of the report flow, held until the
    /// matching birth date arrives.
    pub pending_report_name: Option<String>,
}

impl Session {
    /// Creates a fresh idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session to idle, dropping any half-collected input.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// In-memory session map keyed by user id.
///
/// Each entry carries its own lock, so transitions for one user are
/// serialized while different users never contend with each other beyond
/// the brief map access.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<u64, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session entry for a user, creating it on first contact.
    pub async fn entry(&self, user_id: u64) -> Arc<Mutex<Session>> {
        let mut sessions = self.sessions.lock().await;
        Arc::clone(sessions.entry(user_id).or_default())
    }

    /// Number of known sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Whether no user has interacted yet.
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_idle() {
        let session = Session::new();
        assert_eq!(session.awaiting, Awaiting::None);
        assert!(session.pending_report_name.is_none());
    }

    #[test]
    fn test_reset_clears_pending_name() {
        let mut session = Session {
            awaiting: Awaiting::BirthdayForReport,
            pending_report_name: Some("Ana Lopez".to_owned()),
        };

        session.reset();
        assert_eq!(session, Session::new());
    }

    #[tokio::test]
    async fn test_store_creates_on_first_contact() {
        let store = SessionStore::new();
        assert!(store.is_empty().await);

        let entry = store.entry(7).await;
        assert_eq!(*entry.lock().await, Session::new());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_entries_are_shared_per_user() {
        let store = SessionStore::new();

        {
            let entry = store.entry(7).await;
            entry.lock().await.awaiting = Awaiting::NameForReport;
        }

        let again = store.entry(7).await;
        assert_eq!(again.lock().await.awaiting, Awaiting::NameForReport);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_isolates_users() {
        let store = SessionStore::new();

        store.entry(1).await.lock().await.awaiting = Awaiting::BirthdayForProfile;
        let other = store.entry(2).await;

        assert_eq!(other.lock().await.awaiting, Awaiting::None);
        assert_eq!(store.len().await, 2);
    }
}
