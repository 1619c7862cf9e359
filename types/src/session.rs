//! Verification sessions and their lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::level::VerificationLevel;
use crate::time::Timestamp;
use crate::user::UserId;

/// Opaque session identifier issued by the verification backend.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a verification session.
///
/// Transitions: `Created -> Active` (on first successful validation),
/// then `-> Expired | Invalidated` (terminal). No transition ever returns
/// to `Created`; retrying a tier means creating a new session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Created remotely, not yet validated.
    Created,
    /// Validated and usable for submission.
    Active,
    /// Deadline passed before a terminal submission.
    Expired,
    /// Explicitly invalidated, or consumed by a terminal submission.
    Invalidated,
}

impl SessionStatus {
    /// Whether this state is terminal (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired | Self::Invalidated)
    }
}

/// A time-boxed, tier-scoped verification attempt container.
///
/// Exclusively owned by the session lifecycle manager for its lifetime
/// and destroyed (logically) on expiry, explicit invalidation, or a
/// terminal submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSession {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub level: VerificationLevel,
    pub status: SessionStatus,
    pub expires_at: Timestamp,
}

impl VerificationSession {
    /// Whether the session deadline has passed.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_past(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(status: SessionStatus) -> VerificationSession {
        VerificationSession {
            session_id: SessionId::new("s-1"),
            user_id: UserId::new("u-1"),
            level: VerificationLevel::Basic,
            status,
            expires_at: Timestamp::new(1000),
        }
    }

    #[test]
    fn terminal_states() {
        assert!(!SessionStatus::Created.is_terminal());
        assert!(!SessionStatus::Active.is_terminal());
        assert!(SessionStatus::Expired.is_terminal());
        assert!(SessionStatus::Invalidated.is_terminal());
    }

    #[test]
    fn expiry_is_inclusive_of_the_deadline() {
        let s = session(SessionStatus::Active);
        assert!(!s.is_expired(Timestamp::new(999)));
        assert!(s.is_expired(Timestamp::new(1000)));
        assert!(s.is_expired(Timestamp::new(1001)));
    }

    #[test]
    fn serde_roundtrip() {
        let s = session(SessionStatus::Created);
        let json = serde_json::to_string(&s).unwrap();
        let back: VerificationSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
