//! In-memory session store for tests and ephemeral callers.

use std::collections::HashMap;
use std::sync::RwLock;

use veriflow_types::{UserId, VerificationSession};

use crate::{SessionStore, StoreError};

/// A `SessionStore` backed by a `HashMap`. Nothing survives a restart.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<UserId, VerificationSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a persisted session.
    pub fn len(&self) -> usize {
        self.sessions.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn put_session(&self, session: &VerificationSession) -> Result<(), StoreError> {
        let mut map = self
            .sessions
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        map.insert(session.user_id.clone(), session.clone());
        Ok(())
    }

    fn get_session(&self, user: &UserId) -> Result<Option<VerificationSession>, StoreError> {
        let map = self
            .sessions
            .read()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        Ok(map.get(user).cloned())
    }

    fn delete_session(&self, user: &UserId) -> Result<(), StoreError> {
        let mut map = self
            .sessions
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        map.remove(user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veriflow_types::{SessionId, SessionStatus, Timestamp, VerificationLevel};

    fn session(user: &str) -> VerificationSession {
        VerificationSession {
            session_id: SessionId::new(format!("s-{user}")),
            user_id: UserId::new(user),
            level: VerificationLevel::Basic,
            status: SessionStatus::Created,
            expires_at: Timestamp::new(2000),
        }
    }

    #[test]
    fn put_get_delete_roundtrip() {
        let store = MemorySessionStore::new();
        let s = session("u-1");

        assert_eq!(store.get_session(&s.user_id).unwrap(), None);

        store.put_session(&s).unwrap();
        assert_eq!(store.get_session(&s.user_id).unwrap(), Some(s.clone()));

        store.delete_session(&s.user_id).unwrap();
        assert_eq!(store.get_session(&s.user_id).unwrap(), None);
    }

    #[test]
    fn put_replaces_existing_session() {
        let store = MemorySessionStore::new();
        let mut s = session("u-1");
        store.put_session(&s).unwrap();

        s.level = VerificationLevel::Standard;
        store.put_session(&s).unwrap();

        let loaded = store.get_session(&s.user_id).unwrap().unwrap();
        assert_eq!(loaded.level, VerificationLevel::Standard);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_missing_is_not_an_error() {
        let store = MemorySessionStore::new();
        store.delete_session(&UserId::new("ghost")).unwrap();
    }
}
