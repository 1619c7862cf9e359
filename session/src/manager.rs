//! Verification session lifecycle.
//!
//! The manager owns the session used while a user is actively completing
//! one tier's form: it creates sessions against the backend, persists one
//! reference per user so a reload can pick the attempt back up, promotes
//! sessions to active on first validation, and tears them down.
//!
//! Existence and freshness are separate concerns: [`restore_session`]
//! only answers "is something persisted", [`validate_session`] only
//! answers "is it still usable". Callers must follow a failed validation
//! with [`invalidate_session`].
//!
//! [`restore_session`]: SessionLifecycleManager::restore_session
//! [`validate_session`]: SessionLifecycleManager::validate_session
//! [`invalidate_session`]: SessionLifecycleManager::invalidate_session

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;
use tracing::{debug, info};

use veriflow_resolver::{resolve, LevelResolution};
use veriflow_store::SessionStore;
use veriflow_types::{
    KycError, KycRecord, SessionStatus, Timestamp, UserId, VerificationLevel, VerificationSession,
};

use crate::backend::KycBackend;

/// Owns session creation, restoration, validation, and invalidation.
pub struct SessionLifecycleManager {
    backend: Arc<dyn KycBackend>,
    store: Arc<dyn SessionStore>,
    /// Per-user creation guards: racing creates for the same user are
    /// serialized so at most one active session survives. Entries are
    /// pruned on invalidation, so the map is bounded by the number of
    /// users with a live attempt.
    user_locks: StdMutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl SessionLifecycleManager {
    pub fn new(backend: Arc<dyn KycBackend>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            backend,
            store,
            user_locks: StdMutex::new(HashMap::new()),
        }
    }

    /// The store holding the per-user session references.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    fn user_lock(&self, user: &UserId) -> Result<Arc<Mutex<()>>, KycError> {
        let mut locks = self
            .user_locks
            .lock()
            .map_err(|e| KycError::Other(format!("user lock map poisoned: {e}")))?;
        Ok(locks
            .entry(user.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }

    fn drop_user_lock(&self, user: &UserId) {
        // Holders of an already-cloned Arc keep their guard; only the map
        // entry goes away. A poisoned map is left as-is.
        if let Ok(mut locks) = self.user_locks.lock() {
            locks.remove(user);
        }
    }

    /// Create (or reuse) a session for `(user, level)`.
    ///
    /// The tier must not resolve `Locked` against the supplied history
    /// snapshot. A persisted non-terminal session at the same tier is
    /// reused instead of duplicated; one at a different tier is discarded
    /// first. The backend's answer is checked against the tier in view
    /// before anything is persisted, so a stale in-flight creation from an
    /// abandoned tier switch is discarded rather than applied.
    pub async fn create_session(
        &self,
        user: &UserId,
        level: VerificationLevel,
        history: Option<&[KycRecord]>,
    ) -> Result<VerificationSession, KycError> {
        if level == VerificationLevel::None {
            return Err(KycError::SessionCreation(
                "the zero tier needs no verification session".to_string(),
            ));
        }
        if resolve(history, level) == LevelResolution::Locked {
            return Err(KycError::SessionCreation(format!(
                "level {level} is not yet available"
            )));
        }

        let lock = self.user_lock(user)?;
        let _guard = lock.lock().await;

        let now = Timestamp::now();
        if let Some(existing) = self.store.get_session(user)? {
            if !existing.status.is_terminal() && !existing.is_expired(now) {
                if existing.level == level {
                    debug!(user = %user, session = %existing.session_id, "reusing open session");
                    return Ok(existing);
                }
                // A different tier is now in view; the old attempt is dead.
                info!(
                    user = %user,
                    old_level = %existing.level,
                    new_level = %level,
                    "discarding session for previously selected level"
                );
            }
            self.store.delete_session(user)?;
        }

        let remote = self.backend.create_remote_session(user, level).await?;

        // The in-flight result must match the tier still in view.
        if remote.level != level {
            return Err(KycError::LevelMismatch {
                expected: level,
                actual: remote.level,
            });
        }

        let session = VerificationSession {
            session_id: remote.session_id,
            user_id: user.clone(),
            level,
            status: SessionStatus::Created,
            expires_at: remote.expires_at,
        };
        self.store.put_session(&session)?;

        info!(
            user = %user,
            level = %level,
            session = %session.session_id,
            expires_at = %session.expires_at,
            "verification session created"
        );
        Ok(session)
    }

    /// Look up the persisted session for a user.
    ///
    /// Performs no freshness check; pair with [`validate_session`] before
    /// use.
    ///
    /// [`validate_session`]: SessionLifecycleManager::validate_session
    pub fn restore_session(&self, user: &UserId) -> Result<Option<VerificationSession>, KycError> {
        Ok(self.store.get_session(user)?)
    }

    /// Check whether a session is still usable.
    ///
    /// Returns `false` when the deadline has passed or the backend reports
    /// the session consumed or revoked. On the first successful validation
    /// the session is promoted `Created -> Active` and re-persisted. A
    /// `false` result must be followed by [`invalidate_session`]; the
    /// session must not be reused.
    ///
    /// [`invalidate_session`]: SessionLifecycleManager::invalidate_session
    pub async fn validate_session(
        &self,
        session: &mut VerificationSession,
    ) -> Result<bool, KycError> {
        if session.status.is_terminal() {
            return Ok(false);
        }

        let now = Timestamp::now();
        if session.is_expired(now) {
            session.status = SessionStatus::Expired;
            debug!(session = %session.session_id, "session expired");
            return Ok(false);
        }

        if !self.backend.check_session_validity(&session.session_id).await? {
            debug!(session = %session.session_id, "backend reports session consumed or revoked");
            return Ok(false);
        }

        if session.status == SessionStatus::Created {
            session.status = SessionStatus::Active;
            self.store.put_session(session)?;
            debug!(session = %session.session_id, "session promoted to active");
        }
        Ok(true)
    }

    /// Invalidate a session and clear its persisted reference.
    ///
    /// Idempotent: invalidating an already-invalidated session is a no-op.
    /// An expired session keeps its `Expired` status (terminal states do
    /// not transition) but its persisted reference is still removed.
    pub fn invalidate_session(&self, session: &mut VerificationSession) -> Result<(), KycError> {
        if session.status == SessionStatus::Invalidated {
            return Ok(());
        }
        if session.status != SessionStatus::Expired {
            session.status = SessionStatus::Invalidated;
        }
        self.store.delete_session(&session.user_id)?;
        self.drop_user_lock(&session.user_id);
        info!(
            user = %session.user_id,
            session = %session.session_id,
            "session invalidated"
        );
        Ok(())
    }
}
