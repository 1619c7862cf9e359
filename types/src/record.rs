//! Verification history records.

use serde::{Deserialize, Serialize};

use crate::level::VerificationLevel;
use crate::status::VerificationStatus;
use crate::time::Timestamp;
use crate::user::UserId;

/// One row of a user's verification history: the latest attempt at one tier.
///
/// The verification backend owns these; the client holds a read-only,
/// possibly-stale snapshot (`Vec<KycRecord>`) refreshed on demand. A user
/// normally has at most one record per tier, but the resolver tolerates
/// historical duplicates and treats the most recently updated one as
/// authoritative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycRecord {
    pub user_id: UserId,
    pub level: VerificationLevel,
    pub status: VerificationStatus,
    pub submitted_at: Timestamp,
    pub updated_at: Timestamp,
}

impl KycRecord {
    pub fn new(
        user_id: UserId,
        level: VerificationLevel,
        status: VerificationStatus,
        submitted_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            level,
            status,
            submitted_at,
            updated_at: submitted_at,
        }
    }
}
