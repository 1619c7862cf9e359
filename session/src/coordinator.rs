//! Drives one tier's data collection to a terminal submission outcome.

use std::sync::Arc;

use tracing::{info, warn};

use veriflow_types::{
    KycError, KycRecord, SessionStatus, VerificationLevel, VerificationSession, VerificationStatus,
};

use crate::backend::KycBackend;
use crate::manager::SessionLifecycleManager;
use crate::payload::{Consent, VerificationPayload};

/// Outcome of a completed submission, with the refreshed history attached.
#[derive(Clone, Debug)]
pub struct SubmissionResult {
    pub approved: bool,
    pub level: VerificationLevel,
    pub status: VerificationStatus,
    /// The history snapshot fetched after the submission landed. Resolver
    /// calls made against this snapshot already see the new record, which
    /// closes the stale-history race where a user still reads as locked
    /// right after an approval.
    pub history: Vec<KycRecord>,
}

/// Orchestrates consent checking, submission, and the post-submission
/// history refresh.
pub struct VerificationSubmissionCoordinator {
    backend: Arc<dyn KycBackend>,
    manager: Arc<SessionLifecycleManager>,
}

impl VerificationSubmissionCoordinator {
    pub fn new(backend: Arc<dyn KycBackend>, manager: Arc<SessionLifecycleManager>) -> Self {
        Self { backend, manager }
    }

    /// Submit one tier's payload against an active session.
    ///
    /// Preconditions, all checked before any network call: the session is
    /// `Active`, the payload belongs to the session's tier, and consent is
    /// complete. Transient failures (timeout, backend unavailable) leave
    /// the session active so the caller can retry it; every other failure
    /// is terminal and invalidates the session. A successful submission
    /// also consumes the session, refreshes the caller's history snapshot,
    /// and returns it inside the [`SubmissionResult`].
    pub async fn submit(
        &self,
        session: &mut VerificationSession,
        payload: &VerificationPayload,
        consent: Consent,
    ) -> Result<SubmissionResult, KycError> {
        if session.status != SessionStatus::Active {
            return Err(KycError::SessionExpired);
        }
        if payload.level() != session.level {
            return Err(KycError::LevelMismatch {
                expected: session.level,
                actual: payload.level(),
            });
        }
        if !consent.is_complete() {
            return Err(KycError::ConsentRequired);
        }

        let outcome = match self
            .backend
            .submit_verification(&session.session_id, session.level, payload, &consent)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) if e.is_retryable() => {
                warn!(
                    session = %session.session_id,
                    error = %e,
                    "transient submission failure, session left active for retry"
                );
                return Err(e);
            }
            Err(e) => {
                warn!(
                    session = %session.session_id,
                    error = %e,
                    "terminal submission failure, invalidating session"
                );
                self.manager.invalidate_session(session)?;
                return Err(e);
            }
        };

        // The backend has consumed the session either way.
        self.manager.invalidate_session(session)?;

        info!(
            user = %session.user_id,
            level = %session.level,
            approved = outcome.approved,
            status = %outcome.status,
            "verification submission completed"
        );

        // Refresh before reporting so the resolver sees the new record.
        let history = self.backend.verification_history(&session.user_id).await?;

        Ok(SubmissionResult {
            approved: outcome.approved,
            level: session.level,
            status: outcome.status,
            history,
        })
    }
}
