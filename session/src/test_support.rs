//! Programmable in-process backend used by the manager and coordinator
//! tests. No network involved.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use veriflow_types::{
    KycError, KycRecord, SessionId, Timestamp, UserId, VerificationLevel, VerificationStatus,
};

use crate::backend::{KycBackend, RemoteSession, RemoteSubmissionOutcome};
use crate::payload::{Consent, VerificationPayload};

pub struct MockBackend {
    history: Mutex<Vec<KycRecord>>,
    session_valid: AtomicBool,
    submit_error: Mutex<Option<KycError>>,
    submit_outcome: Mutex<RemoteSubmissionOutcome>,
    created_level_override: Mutex<Option<VerificationLevel>>,
    create_delay_ms: AtomicU64,
    expire_new_sessions: AtomicBool,
    create_counter: AtomicUsize,
    validity_counter: AtomicUsize,
    submit_counter: AtomicUsize,
    history_counter: AtomicUsize,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            history: Mutex::new(Vec::new()),
            session_valid: AtomicBool::new(true),
            submit_error: Mutex::new(None),
            submit_outcome: Mutex::new(RemoteSubmissionOutcome {
                approved: true,
                status: VerificationStatus::Approved,
            }),
            created_level_override: Mutex::new(None),
            create_delay_ms: AtomicU64::new(0),
            expire_new_sessions: AtomicBool::new(false),
            create_counter: AtomicUsize::new(0),
            validity_counter: AtomicUsize::new(0),
            submit_counter: AtomicUsize::new(0),
            history_counter: AtomicUsize::new(0),
        }
    }

    pub fn set_history(&self, history: Vec<KycRecord>) {
        *self.history.lock().unwrap() = history;
    }

    pub fn set_session_valid(&self, valid: bool) {
        self.session_valid.store(valid, Ordering::SeqCst);
    }

    pub fn set_submit_outcome(&self, outcome: RemoteSubmissionOutcome) {
        *self.submit_outcome.lock().unwrap() = outcome;
    }

    /// Fail the next submission with `error` (one-shot).
    pub fn fail_next_submit_with(&self, error: KycError) {
        *self.submit_error.lock().unwrap() = Some(error);
    }

    /// Have every created session come back bound to `level`, regardless
    /// of what was requested.
    pub fn bind_created_sessions_to(&self, level: VerificationLevel) {
        *self.created_level_override.lock().unwrap() = Some(level);
    }

    /// Widen the race window in creation tests.
    pub fn delay_creates_ms(&self, ms: u64) {
        self.create_delay_ms.store(ms, Ordering::SeqCst);
    }

    /// Have every created session come back already past its deadline.
    pub fn expire_created_sessions(&self) {
        self.expire_new_sessions.store(true, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> usize {
        self.create_counter.load(Ordering::SeqCst)
    }

    pub fn validity_calls(&self) -> usize {
        self.validity_counter.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_counter.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self) -> usize {
        self.history_counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KycBackend for MockBackend {
    async fn verification_history(&self, _user: &UserId) -> Result<Vec<KycRecord>, KycError> {
        self.history_counter.fetch_add(1, Ordering::SeqCst);
        Ok(self.history.lock().unwrap().clone())
    }

    async fn create_remote_session(
        &self,
        _user: &UserId,
        level: VerificationLevel,
    ) -> Result<RemoteSession, KycError> {
        let delay = self.create_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let n = self.create_counter.fetch_add(1, Ordering::SeqCst) + 1;
        let level = self
            .created_level_override
            .lock()
            .unwrap()
            .unwrap_or(level);
        let expires_at = if self.expire_new_sessions.load(Ordering::SeqCst) {
            Timestamp::new(1)
        } else {
            Timestamp::new(Timestamp::now().as_secs() + 900)
        };

        Ok(RemoteSession {
            session_id: SessionId::new(format!("mock-session-{n}")),
            level,
            expires_at,
        })
    }

    async fn check_session_validity(&self, _session: &SessionId) -> Result<bool, KycError> {
        self.validity_counter.fetch_add(1, Ordering::SeqCst);
        Ok(self.session_valid.load(Ordering::SeqCst))
    }

    async fn submit_verification(
        &self,
        _session: &SessionId,
        _level: VerificationLevel,
        _payload: &VerificationPayload,
        _consent: &Consent,
    ) -> Result<RemoteSubmissionOutcome, KycError> {
        self.submit_counter.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.submit_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.submit_outcome.lock().unwrap().clone())
    }
}
