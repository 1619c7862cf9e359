//! Per-attempt verification statuses and the policy helpers over them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KycError;

/// The status of a single verification attempt at one tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Attempt record exists but nothing was submitted yet.
    NotStarted,
    /// Submitted, decision outstanding.
    Pending,
    /// Submitted, flagged for manual review.
    NeedsReview,
    /// Verified at this tier.
    Approved,
    /// Rejected; the tier can be re-attempted.
    Rejected,
    /// Blocked by the provider; currently treated like `Rejected`.
    Blocked,
}

impl VerificationStatus {
    /// Whether a decision is still outstanding (`Pending` or `NeedsReview`).
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Pending | Self::NeedsReview)
    }

    /// Whether the tier can be re-attempted after this outcome.
    ///
    /// `Blocked` is retryable alongside `Rejected`; if `Blocked` ever becomes
    /// permanently terminal, this is the single place to change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Rejected | Self::Blocked)
    }

    /// The lowercase wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::NotStarted => "not_started",
            VerificationStatus::Pending => "pending",
            VerificationStatus::NeedsReview => "needs_review",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
            VerificationStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = KycError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(VerificationStatus::NotStarted),
            "pending" => Ok(VerificationStatus::Pending),
            "needs_review" => Ok(VerificationStatus::NeedsReview),
            "approved" => Ok(VerificationStatus::Approved),
            "rejected" => Ok(VerificationStatus::Rejected),
            "blocked" => Ok(VerificationStatus::Blocked),
            other => Err(KycError::InvalidRecord(format!(
                "unknown verification status: {other}"
            ))),
        }
    }
}
