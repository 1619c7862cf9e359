//! Top-level error taxonomy shared across crates.
//!
//! Each variant maps to a distinct, actionable condition so the
//! presentation layer never has to guess from a generic failure.

use thiserror::Error;

use crate::level::VerificationLevel;

/// Common error type for the Veriflow KYC core.
#[derive(Debug, Error)]
pub enum KycError {
    #[error("cannot create session: {0}")]
    SessionCreation(String),

    #[error("verification session has expired or is no longer active")]
    SessionExpired,

    #[error("session is bound to level {expected}, but level {actual} is in view")]
    LevelMismatch {
        expected: VerificationLevel,
        actual: VerificationLevel,
    },

    #[error("consent and terms acceptance are required before submission")]
    ConsentRequired,

    #[error("{0} timed out")]
    Timeout(String),

    #[error("verification backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid verification record: {0}")]
    InvalidRecord(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl KycError {
    /// Whether the caller may retry the same operation with the same session.
    ///
    /// Only transient transport failures qualify; everything else requires
    /// the causing condition to change first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::BackendUnavailable(_))
    }
}
