//! The verification backend interface and its HTTP implementation.
//!
//! The backend owns the verification decision and the authoritative
//! history; this crate only orchestrates around it. [`HttpKycBackend`]
//! wraps `reqwest::Client` with the backend's base URL, explicit
//! timeouts, and typed methods for the four calls the core needs.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use veriflow_types::{
    KycError, KycRecord, SessionId, Timestamp, UserId, VerificationLevel, VerificationStatus,
};

use crate::config::ClientConfig;
use crate::payload::{Consent, VerificationPayload};

/// A freshly created remote session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteSession {
    pub session_id: SessionId,
    /// Tier the backend bound the session to. Checked against the tier in
    /// view before the session is persisted.
    pub level: VerificationLevel,
    pub expires_at: Timestamp,
}

/// Terminal outcome of a submission, as reported by the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteSubmissionOutcome {
    pub approved: bool,
    pub status: VerificationStatus,
}

/// The two collaborator interfaces of the core (status query and
/// session/verification backend), collapsed into one trait since they are
/// served by the same service.
#[async_trait]
pub trait KycBackend: Send + Sync {
    /// Fetch the user's full verification history. An empty vec is the
    /// normal answer for a brand-new user, not an error.
    async fn verification_history(&self, user: &UserId) -> Result<Vec<KycRecord>, KycError>;

    /// Open a verification session for (user, tier).
    async fn create_remote_session(
        &self,
        user: &UserId,
        level: VerificationLevel,
    ) -> Result<RemoteSession, KycError>;

    /// Server-side freshness check: `false` when the session has been
    /// consumed or revoked.
    async fn check_session_validity(&self, session: &SessionId) -> Result<bool, KycError>;

    /// Submit one tier's payload against an active session.
    async fn submit_verification(
        &self,
        session: &SessionId,
        level: VerificationLevel,
        payload: &VerificationPayload,
        consent: &Consent,
    ) -> Result<RemoteSubmissionOutcome, KycError>;
}

// ── HTTP implementation ─────────────────────────────────────────────────

/// HTTP client for the verification backend's JSON API.
#[derive(Clone)]
pub struct HttpKycBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpKycBackend {
    /// Create a client targeting the given base URL with default timeouts
    /// (30s per request, 10s to connect).
    pub fn new(base_url: impl Into<String>) -> Result<Self, KycError> {
        Self::with_timeouts(base_url, Duration::from_secs(30), Duration::from_secs(10))
    }

    /// Create a client from a loaded [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, KycError> {
        Self::with_timeouts(
            config.backend_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    fn with_timeouts(
        base_url: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, KycError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| {
                KycError::BackendUnavailable(format!("failed to create HTTP client: {e}"))
            })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// The configured backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

/// Map a transport failure to the error taxonomy: timeouts are their own
/// variant so callers can retry them; everything else is backend
/// unavailability.
fn transport_error(what: &str, e: reqwest::Error) -> KycError {
    if e.is_timeout() {
        KycError::Timeout(what.to_string())
    } else {
        KycError::BackendUnavailable(format!("{what}: {e}"))
    }
}

/// Map a non-success HTTP status: 5xx is transient unavailability, 4xx is
/// a terminal rejection of the request itself.
fn status_error(what: &str, status: reqwest::StatusCode) -> KycError {
    if status.is_server_error() {
        KycError::BackendUnavailable(format!("{what}: HTTP {status}"))
    } else {
        KycError::Other(format!("backend rejected {what}: HTTP {status}"))
    }
}

// Wire DTOs. Level and status stay strings here so one malformed row
// degrades to absent instead of failing the whole response.

#[derive(Debug, Deserialize)]
struct RawKycRecord {
    #[serde(default)]
    user_id: String,
    level: String,
    status: String,
    #[serde(default)]
    submitted_at: u64,
    #[serde(default)]
    updated_at: Option<u64>,
}

impl RawKycRecord {
    fn into_record(self) -> Result<KycRecord, KycError> {
        let level = VerificationLevel::from_str(&self.level)?;
        let status = VerificationStatus::from_str(&self.status)?;
        let submitted_at = Timestamp::new(self.submitted_at);
        let mut record = KycRecord::new(UserId::new(self.user_id), level, status, submitted_at);
        record.updated_at = self.updated_at.map(Timestamp::new).unwrap_or(submitted_at);
        Ok(record)
    }
}

#[derive(Debug, Deserialize)]
struct CreateSessionResponse {
    session_id: String,
    level: String,
    expires_at: u64,
}

#[derive(Debug, Deserialize)]
struct SessionValidityResponse {
    valid: bool,
}

#[derive(Debug, Deserialize)]
struct SubmissionResponse {
    approved: bool,
    status: String,
}

#[async_trait]
impl KycBackend for HttpKycBackend {
    async fn verification_history(&self, user: &UserId) -> Result<Vec<KycRecord>, KycError> {
        let what = "history fetch";
        let response = self
            .http
            .get(self.url(&format!("/kyc/history/{user}")))
            .send()
            .await
            .map_err(|e| transport_error(what, e))?;

        if !response.status().is_success() {
            return Err(status_error(what, response.status()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| transport_error(what, e))?;

        // Defensive: a non-array body degrades to an empty history rather
        // than poisoning every resolver downstream.
        let Some(rows) = body.as_array() else {
            tracing::warn!(user = %user, "history response is not an array, treating as empty");
            return Ok(Vec::new());
        };

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let raw: RawKycRecord = match serde_json::from_value(row.clone()) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(user = %user, error = %e, "dropping malformed history row");
                    continue;
                }
            };
            match raw.into_record() {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(user = %user, error = %e, "dropping malformed history row");
                }
            }
        }
        Ok(records)
    }

    async fn create_remote_session(
        &self,
        user: &UserId,
        level: VerificationLevel,
    ) -> Result<RemoteSession, KycError> {
        let what = "session creation";
        let response = self
            .http
            .post(self.url("/kyc/sessions"))
            .json(&serde_json::json!({
                "user_id": user,
                "level": level,
            }))
            .send()
            .await
            .map_err(|e| transport_error(what, e))?;

        if !response.status().is_success() {
            return Err(status_error(what, response.status()));
        }

        let resp: CreateSessionResponse = response
            .json()
            .await
            .map_err(|e| transport_error(what, e))?;

        Ok(RemoteSession {
            session_id: SessionId::new(resp.session_id),
            level: VerificationLevel::from_str(&resp.level)?,
            expires_at: Timestamp::new(resp.expires_at),
        })
    }

    async fn check_session_validity(&self, session: &SessionId) -> Result<bool, KycError> {
        let what = "session validity check";
        let response = self
            .http
            .get(self.url(&format!("/kyc/sessions/{session}/valid")))
            .send()
            .await
            .map_err(|e| transport_error(what, e))?;

        if !response.status().is_success() {
            return Err(status_error(what, response.status()));
        }

        let resp: SessionValidityResponse = response
            .json()
            .await
            .map_err(|e| transport_error(what, e))?;
        Ok(resp.valid)
    }

    async fn submit_verification(
        &self,
        session: &SessionId,
        level: VerificationLevel,
        payload: &VerificationPayload,
        consent: &Consent,
    ) -> Result<RemoteSubmissionOutcome, KycError> {
        let what = "verification submission";
        let response = self
            .http
            .post(self.url(&format!("/kyc/sessions/{session}/submit")))
            .json(&serde_json::json!({
                "level": level,
                "payload": payload,
                "consent": consent,
            }))
            .send()
            .await
            .map_err(|e| transport_error(what, e))?;

        if !response.status().is_success() {
            return Err(status_error(what, response.status()));
        }

        let resp: SubmissionResponse = response
            .json()
            .await
            .map_err(|e| transport_error(what, e))?;

        Ok(RemoteSubmissionOutcome {
            approved: resp.approved,
            status: VerificationStatus::from_str(&resp.status)?,
        })
    }
}
