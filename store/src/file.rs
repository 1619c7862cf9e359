//! JSON-file session store.
//!
//! The whole user -> session map lives in one JSON file, rewritten on
//! every mutation via a temp file and an atomic rename so a crash never
//! leaves a torn file behind. The map holds one small record per user,
//! so rewriting it wholesale stays cheap.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use veriflow_types::{UserId, VerificationSession};

use crate::{SessionStore, StoreError};

/// A `SessionStore` persisted to a single JSON file.
pub struct FileSessionStore {
    path: PathBuf,
    sessions: RwLock<HashMap<UserId, VerificationSession>>,
}

impl FileSessionStore {
    /// Open the store at `path`, loading any existing session map.
    ///
    /// A missing file is an empty store; an unreadable or unparseable
    /// file is an error rather than silent data loss.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let sessions = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| StoreError::Corruption(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(StoreError::Backend(format!(
                    "cannot read {}: {e}",
                    path.display()
                )))
            }
        };
        Ok(Self {
            path,
            sessions: RwLock::new(sessions),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, map: &HashMap<UserId, VerificationSession>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(map)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)
            .map_err(|e| StoreError::Backend(format!("cannot write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            StoreError::Backend(format!("cannot replace {}: {e}", self.path.display()))
        })?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn put_session(&self, session: &VerificationSession) -> Result<(), StoreError> {
        let mut map = self
            .sessions
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        map.insert(session.user_id.clone(), session.clone());
        self.flush(&map)
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
        if map.remove(user).is_some() {
            self.flush(&map)?;
        }
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
            level: VerificationLevel::Standard,
            status: SessionStatus::Active,
            expires_at: Timestamp::new(5000),
        }
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");

        let s = session("u-1");
        {
            let store = FileSessionStore::open(&path).unwrap();
            store.put_session(&s).unwrap();
        }

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.get_session(&s.user_id).unwrap(), Some(s));
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::open(dir.path().join("none.json")).unwrap();
        assert_eq!(store.get_session(&UserId::new("u-1")).unwrap(), None);
    }

    #[test]
    fn corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        fs::write(&path, "not json at all").unwrap();

        let result = FileSessionStore::open(&path);
        assert!(matches!(result, Err(StoreError::Corruption(_))));
    }

    #[test]
    fn delete_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");

        let s = session("u-1");
        {
            let store = FileSessionStore::open(&path).unwrap();
            store.put_session(&s).unwrap();
            store.delete_session(&s.user_id).unwrap();
        }

        let reopened = FileSessionStore::open(&path).unwrap();
        assert_eq!(reopened.get_session(&s.user_id).unwrap(), None);
    }

    #[test]
    fn one_session_per_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::open(dir.path().join("sessions.json")).unwrap();

        let mut s = session("u-1");
        store.put_session(&s).unwrap();
        s.session_id = SessionId::new("s-replacement");
        store.put_session(&s).unwrap();

        let loaded = store.get_session(&s.user_id).unwrap().unwrap();
        assert_eq!(loaded.session_id, SessionId::new("s-replacement"));
    }
}
